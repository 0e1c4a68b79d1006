//! Response cache for the football data client
//!
//! Raw JSON responses are cached per endpoint and query parameters for a
//! fixed time-to-live, using the moka crate for a thread-safe,
//! async-compatible cache.

use moka::future::Cache;
use pitchside_core::DataApiConfig;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// TTL cache of API responses
#[derive(Clone)]
pub struct ResponseCache {
    cache: Cache<String, Value>,
    stats: Arc<CacheStats>,
    ttl: Duration,
}

impl ResponseCache {
    /// Create a cache with the given time-to-live and capacity
    pub fn new(ttl: Duration, max_capacity: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(ttl)
            .build();

        Self {
            cache,
            stats: Arc::new(CacheStats::new("football_api")),
            ttl,
        }
    }

    /// Create from config
    pub fn from_config(config: &DataApiConfig) -> Self {
        Self::new(
            Duration::from_secs(config.cache_ttl_secs),
            config.cache_max_capacity,
        )
    }

    /// Cached response, if still fresh
    pub async fn get(&self, key: &str) -> Option<Value> {
        let result = self.cache.get(key).await;

        if result.is_some() {
            self.stats.record_hit();
        } else {
            self.stats.record_miss();
        }

        result
    }

    /// Store a response
    pub async fn put(&self, key: impl Into<String>, value: Value) {
        self.cache.insert(key.into(), value).await;
        self.stats.record_write();
    }

    /// Drop every cached response and reset the counters
    pub async fn clear(&self) {
        self.cache.invalidate_all();
        // Wait for all pending invalidations to complete
        self.cache.run_pending_tasks().await;
        self.stats.reset();
        tracing::info!("Data cache cleared");
    }

    /// Get cache statistics
    pub fn stats(&self) -> Arc<CacheStats> {
        Arc::clone(&self.stats)
    }

    /// Get current cache size
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Serializable snapshot of the cache state
    pub async fn report(&self) -> CacheReport {
        self.cache.run_pending_tasks().await;

        CacheReport {
            name: self.stats.name().to_string(),
            cached_items: self.entry_count(),
            ttl_secs: self.ttl.as_secs(),
            hits: self.stats.hits(),
            misses: self.stats.misses(),
            writes: self.stats.writes(),
            hit_rate: self.stats.hit_rate(),
        }
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::from_config(&DataApiConfig::default())
    }
}

/// Cache key for an endpoint and its query parameters
pub fn cache_key(endpoint: &str, params: &[(&str, String)]) -> String {
    if params.is_empty() {
        return endpoint.to_string();
    }

    let query: Vec<String> = params
        .iter()
        .map(|(name, value)| format!("{name}={value}"))
        .collect();
    format!("{endpoint}?{}", query.join("&"))
}

// ============================================================================
// Cache Statistics
// ============================================================================

/// Hit/miss counters for a cache
#[derive(Debug)]
pub struct CacheStats {
    /// Cache name for identification
    name: String,
    hits: AtomicU64,
    misses: AtomicU64,
    writes: AtomicU64,
}

impl CacheStats {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            writes: AtomicU64::new(0),
        }
    }

    fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::Relaxed);
    }

    fn reset(&self) {
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.writes.store(0, Ordering::Relaxed);
    }

    /// Get cache name
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn writes(&self) -> u64 {
        self.writes.load(Ordering::Relaxed)
    }

    /// Calculate hit rate (0.0 - 1.0)
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits() + self.misses();
        if total == 0 {
            0.0
        } else {
            self.hits() as f64 / total as f64
        }
    }
}

/// Serializable cache report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheReport {
    /// Cache name
    pub name: String,
    /// Entries currently cached
    pub cached_items: u64,
    /// Time-to-live of an entry
    pub ttl_secs: u64,
    pub hits: u64,
    pub misses: u64,
    pub writes: u64,
    /// Hit rate (0.0 - 1.0)
    pub hit_rate: f64,
}
