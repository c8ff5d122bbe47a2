use std::{convert::Infallible, sync::Arc, time::Duration};

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use folio_core::application::{ThemeChanged, ThemeSettingsStore};
use futures::{Stream, StreamExt};
use tokio_stream::wrappers::{
    BroadcastStream, errors::BroadcastStreamRecvError,
};
use tracing::warn;

use crate::infra::app_state::AppState;

fn theme_event(event: &ThemeChanged) -> Option<Event> {
    Event::default()
        .event(ThemeChanged::EVENT_NAME)
        .id(event.revision.to_string())
        .json_data(event)
        .ok()
}

pub fn build_theme_event_stream(
    store: Arc<ThemeSettingsStore>,
) -> impl Stream<Item = Result<Event, Infallible>> + Send + 'static {
    let receiver = store.events().subscribe();

    async_stream::stream! {
        let mut live = BroadcastStream::new(receiver);
        let mut last_sent = 0;
        while let Some(item) = live.next().await {
            let event = match item {
                Ok(event) if event.revision <= last_sent => continue,
                Ok(event) => event,
                Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                    // Missed events are collapsed into one carrying the
                    // current state; older buffered events are then skipped.
                    warn!(skipped, "theme SSE subscriber lagged");
                    let active = store.get_active_theme().await;
                    ThemeChanged {
                        revision: store.events().revision(),
                        name: active.name,
                        updated_at: active.updated_at,
                    }
                }
            };
            last_sent = event.revision;
            if let Some(sse) = theme_event(&event) {
                yield Ok::<Event, Infallible>(sse);
            }
        }
    }
}

/// GET /api/v1/settings/theme/events - tells open pages to refresh after a
/// theme change.
pub async fn theme_events_sse_handler(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let stream = build_theme_event_stream(Arc::clone(state.theme_store()));

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}
