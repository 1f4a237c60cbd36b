use core_types::PricePoint;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// A generic memoization layer for fetched price histories.
///
/// A cache miss must be treated identically to a fresh computation, so a
/// no-op implementation is a valid substitute anywhere a cache is taken.
pub trait HistoryCache: Send + Sync {
    fn get(&self, key: &str) -> Option<Vec<PricePoint>>;
    fn set(&self, key: &str, points: Vec<PricePoint>, ttl: Duration);
}

struct CacheEntry {
    expires_at: Instant,
    points: Vec<PricePoint>,
}

/// An in-process TTL cache. Expired entries are dropped lazily on read.
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HistoryCache for MemoryCache {
    fn get(&self, key: &str) -> Option<Vec<PricePoint>> {
        let Ok(mut entries) = self.entries.lock() else {
            return None;
        };
        match entries.get(key) {
            Some(entry) if Instant::now() < entry.expires_at => Some(entry.points.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    fn set(&self, key: &str, points: Vec<PricePoint>, ttl: Duration) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(
                key.to_string(),
                CacheEntry {
                    expires_at: Instant::now() + ttl,
                    points,
                },
            );
        }
    }
}

/// A cache that remembers nothing. Useful for tests and one-shot runs.
pub struct NoopCache;

impl HistoryCache for NoopCache {
    fn get(&self, _key: &str) -> Option<Vec<PricePoint>> {
        None
    }

    fn set(&self, _key: &str, _points: Vec<PricePoint>, _ttl: Duration) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_points() -> Vec<PricePoint> {
        vec![PricePoint {
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            price: Some(471.3),
        }]
    }

    #[test]
    fn memory_cache_round_trips_within_ttl() {
        let cache = MemoryCache::new();
        cache.set("hist:v1:spy.us:30", sample_points(), Duration::from_secs(60));
        assert_eq!(cache.get("hist:v1:spy.us:30"), Some(sample_points()));
    }

    #[test]
    fn memory_cache_expires_entries() {
        let cache = MemoryCache::new();
        cache.set("hist:v1:spy.us:30", sample_points(), Duration::ZERO);
        assert_eq!(cache.get("hist:v1:spy.us:30"), None);
    }

    #[test]
    fn memory_cache_misses_unknown_keys() {
        let cache = MemoryCache::new();
        assert_eq!(cache.get("hist:v1:qqq.us:30"), None);
    }

    #[test]
    fn noop_cache_never_stores() {
        let cache = NoopCache;
        cache.set("hist:v1:spy.us:30", sample_points(), Duration::from_secs(60));
        assert_eq!(cache.get("hist:v1:spy.us:30"), None);
    }
}
