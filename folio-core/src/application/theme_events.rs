use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::domain::theme::ThemeName;

/// Published after every successful theme write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeChanged {
    pub revision: u64,
    pub name: ThemeName,
    pub updated_at: DateTime<Utc>,
}

impl ThemeChanged {
    pub const EVENT_NAME: &'static str = "theme-changed";
}

/// In-process fan-out of [`ThemeChanged`] to caches and open pages.
///
/// The revision counter starts at zero and is bumped on each publish, so a
/// cache can compare against [`ThemeEventBus::revision`] without holding a
/// subscription.
pub struct ThemeEventBus {
    tx: broadcast::Sender<ThemeChanged>,
    revision: AtomicU64,
    capacity: usize,
}

impl fmt::Debug for ThemeEventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeEventBus")
            .field("capacity", &self.capacity)
            .field("subscribers", &self.tx.receiver_count())
            .field("revision", &self.revision())
            .finish()
    }
}

impl ThemeEventBus {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (tx, _rx) = broadcast::channel(capacity);
        Self {
            tx,
            revision: AtomicU64::new(0),
            capacity,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ThemeChanged> {
        self.tx.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }

    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::Acquire)
    }

    pub fn publish(
        &self,
        name: ThemeName,
        updated_at: DateTime<Utc>,
    ) -> ThemeChanged {
        let revision = self.revision.fetch_add(1, Ordering::AcqRel) + 1;
        let event = ThemeChanged {
            revision,
            name,
            updated_at,
        };
        // No subscribers is fine; the revision bump alone invalidates caches.
        let _ = self.tx.send(event.clone());
        event
    }
}

impl Default for ThemeEventBus {
    fn default() -> Self {
        Self::new(16)
    }
}
