//! Cache Statistics Module
//!
//! Tracks cache performance metrics including hits, misses, and upstream fetches.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache performance metrics.
///
/// `hits` is kept by `SnapshotCache` in an atomic and filled in on read.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Requests answered from a fresh snapshot
    pub hits: u64,
    /// Requests that went to the upstream (expired, empty, or forced)
    pub misses: u64,
    /// Successful upstream aggregations
    pub upstream_fetches: u64,
    /// Failed upstream aggregations
    pub failed_fetches: u64,
    /// Upstream pages consumed by successful aggregations
    pub pages_fetched: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no requests have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Record Miss ==
    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Fetch ==
    /// Counts a successful aggregation and the pages it consumed.
    pub fn record_fetch(&mut self, pages: usize) {
        self.upstream_fetches += 1;
        self.pages_fetched += pages as u64;
    }

    // == Record Failure ==
    /// Increments the failed fetch counter.
    pub fn record_failure(&mut self) {
        self.failed_fetches += 1;
    }
}
