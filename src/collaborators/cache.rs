//! Report cache contract and an in-memory implementation.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use crate::report::Report;

/// Time-to-live used when the caller has no preference.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(3600);

/// Default upper bound on entries held by [`InMemoryReportCache`].
const DEFAULT_MAX_ENTRIES: usize = 1000;

/// Key-value store for finished reports. Keys are normalized page URLs.
pub trait ReportCache: Send + Sync {
    /// A live (unexpired) report for `key`.
    fn get(&self, key: &str) -> Option<Report>;

    fn set(&self, key: &str, report: &Report, ttl: Duration);

    /// Removes `key`; returns whether it was present.
    fn delete(&self, key: &str) -> bool;

    fn clear(&self);
}

struct Entry {
    report: Report,
    /// `None` when the TTL reaches past what `Instant` can represent.
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.is_none_or(|expires_at| expires_at > now)
    }
}

/// Process-local report cache.
///
/// Expired entries are dropped lazily on read. When full, expired entries
/// are purged first, then the entry closest to expiry is evicted.
pub struct InMemoryReportCache {
    entries: RwLock<HashMap<String, Entry>>,
    max_entries: usize,
}

impl InMemoryReportCache {
    pub fn new() -> Self {
        Self::with_max_entries(DEFAULT_MAX_ENTRIES)
    }

    pub fn with_max_entries(max_entries: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            max_entries: max_entries.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryReportCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for InMemoryReportCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryReportCache")
            .field("entries", &self.len())
            .field("max_entries", &self.max_entries)
            .finish()
    }
}

impl ReportCache for InMemoryReportCache {
    fn get(&self, key: &str) -> Option<Report> {
        let now = Instant::now();
        {
            let entries = self.entries.read().ok()?;
            match entries.get(key) {
                Some(entry) if entry.is_live(now) => return Some(entry.report.clone()),
                Some(_) => {}
                None => return None,
            }
        }

        log::debug!("Cache entry for {} expired", key);
        if let Ok(mut entries) = self.entries.write() {
            if entries.get(key).is_some_and(|entry| !entry.is_live(now)) {
                entries.remove(key);
            }
        }
        None
    }

    fn set(&self, key: &str, report: &Report, ttl: Duration) {
        let mut entries = match self.entries.write() {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("Report cache lock poisoned, not caching {}: {}", key, e);
                return;
            }
        };

        if !entries.contains_key(key) && entries.len() >= self.max_entries {
            let now = Instant::now();
            entries.retain(|_, entry| entry.is_live(now));
            if entries.len() >= self.max_entries {
                // Entries that never expire sort last.
                let soonest = entries
                    .iter()
                    .min_by_key(|(_, entry)| (entry.expires_at.is_none(), entry.expires_at))
                    .map(|(k, _)| k.clone());
                if let Some(evicted) = soonest {
                    entries.remove(&evicted);
                }
            }
        }

        entries.insert(
            key.to_string(),
            Entry {
                report: report.clone(),
                expires_at: Instant::now().checked_add(ttl),
            },
        );
    }

    fn delete(&self, key: &str) -> bool {
        self.entries
            .write()
            .map(|mut entries| entries.remove(key).is_some())
            .unwrap_or(false)
    }

    fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::ReportAggregator;

    fn report(url: &str) -> Report {
        ReportAggregator::new().analyze(url, "<title>Cached page title</title>")
    }

    #[test]
    fn test_set_get_delete() {
        let cache = InMemoryReportCache::new();
        let key = "https://example.com/";
        assert!(cache.get(key).is_none());

        cache.set(key, &report(key), DEFAULT_CACHE_TTL);
        assert_eq!(cache.get(key).map(|r| r.url), Some(key.to_string()));

        assert!(cache.delete(key));
        assert!(!cache.delete(key));
        assert!(cache.get(key).is_none());
    }

    #[test]
    fn test_expired_entry_is_dropped() {
        let cache = InMemoryReportCache::new();
        let key = "https://example.com/";
        cache.set(key, &report(key), Duration::ZERO);
        assert!(cache.get(key).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_eviction_when_full() {
        let cache = InMemoryReportCache::with_max_entries(2);
        cache.set("a", &report("https://a.example/"), Duration::from_secs(10));
        cache.set("b", &report("https://b.example/"), Duration::from_secs(100));
        cache.set("c", &report("https://c.example/"), Duration::from_secs(100));
        assert_eq!(cache.len(), 2);
        assert!(cache.get("a").is_none());
        assert!(cache.get("b").is_some());
        assert!(cache.get("c").is_some());
    }

    #[test]
    fn test_unbounded_ttl_never_expires() {
        let cache = InMemoryReportCache::new();
        let key = "https://example.com/";
        cache.set(key, &report(key), Duration::MAX);
        assert_eq!(cache.get(key).map(|r| r.url), Some(key.to_string()));
    }

    #[test]
    fn test_eviction_keeps_unbounded_entries() {
        let cache = InMemoryReportCache::with_max_entries(2);
        cache.set("a", &report("https://a.example/"), Duration::MAX);
        cache.set("b", &report("https://b.example/"), Duration::from_secs(100));
        cache.set("c", &report("https://c.example/"), Duration::from_secs(100));
        assert!(cache.get("a").is_some());
        assert!(cache.get("b").is_none());
        assert!(cache.get("c").is_some());
    }

    #[test]
    fn test_clear() {
        let cache = InMemoryReportCache::new();
        cache.set("a", &report("https://a.example/"), DEFAULT_CACHE_TTL);
        cache.set("b", &report("https://b.example/"), DEFAULT_CACHE_TTL);
        cache.clear();
        assert!(cache.is_empty());
    }
}
