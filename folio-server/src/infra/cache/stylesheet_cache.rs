use std::sync::Arc;

use parking_lot::RwLock;

#[derive(Debug)]
struct CachedStylesheet {
    revision: u64,
    css: Arc<str>,
}

/// Rendered `/theme.css` keyed by the theme event-bus revision.
///
/// An entry is served only while its revision matches the current one, so
/// any theme write invalidates it without explicit eviction.
#[derive(Debug)]
pub struct StylesheetCache {
    enabled: bool,
    entry: RwLock<Option<CachedStylesheet>>,
}

impl StylesheetCache {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            entry: RwLock::new(None),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn get(&self, revision: u64) -> Option<Arc<str>> {
        if !self.enabled {
            return None;
        }
        self.entry
            .read()
            .as_ref()
            .filter(|cached| cached.revision == revision)
            .map(|cached| Arc::clone(&cached.css))
    }

    pub fn store(&self, revision: u64, css: String) -> Arc<str> {
        let css: Arc<str> = Arc::from(css);
        if self.enabled {
            let mut entry = self.entry.write();
            // Never replace a newer render with an older one.
            if entry.as_ref().is_none_or(|cached| cached.revision <= revision) {
                *entry = Some(CachedStylesheet {
                    revision,
                    css: Arc::clone(&css),
                });
            }
        }
        css
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_only_on_matching_revision() {
        let cache = StylesheetCache::new(true);
        assert!(cache.get(0).is_none());

        cache.store(3, ":root {}".into());
        assert_eq!(cache.get(3).as_deref(), Some(":root {}"));
        assert!(cache.get(4).is_none());
    }

    #[test]
    fn older_render_does_not_clobber_newer() {
        let cache = StylesheetCache::new(true);
        cache.store(5, "new".into());
        cache.store(4, "old".into());
        assert_eq!(cache.get(5).as_deref(), Some("new"));
    }

    #[test]
    fn disabled_cache_never_hits() {
        let cache = StylesheetCache::new(false);
        let css = cache.store(1, "x".into());
        assert_eq!(&*css, "x");
        assert!(cache.get(1).is_none());
    }
}
