use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use crate::models::MatchResult;

/// In-process cache of match results keyed by canonical tag set
///
/// Safe to share between workers. Results are a pure function of the tag set
/// and the static catalog, so an entry never goes stale before its TTL.
pub struct MatchCache {
    entries: moka::future::Cache<String, MatchResult>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl MatchCache {
    /// Create a new cache bounded to `max_entries`
    pub fn new(max_entries: u64, ttl_secs: u64) -> Self {
        let entries = moka::future::CacheBuilder::new(max_entries)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self {
            entries,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub async fn get(&self, key: &str) -> Option<MatchResult> {
        let value = self.entries.get(key).await;
        if value.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
            tracing::trace!("Match cache hit: {}", key);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            tracing::trace!("Match cache miss: {}", key);
        }
        value
    }

    pub async fn insert(&self, key: String, value: MatchResult) {
        self.entries.insert(key, value).await;
    }

    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let lookups = hits + misses;
        CacheStats {
            entries: self.entries.entry_count(),
            hits,
            misses,
            hit_rate: if lookups > 0 {
                hits as f64 / lookups as f64
            } else {
                0.0
            },
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub entries: u64,
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Key for a match over an already normalized tag set
    pub fn match_result(tags: &BTreeSet<String>) -> String {
        format!("match:{:?}", tags)
    }
}
