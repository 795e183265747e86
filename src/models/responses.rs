//! Response DTOs for the forms proxy API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::models::Form;

/// Response body for `GET /api/hubspot-forms`
///
/// Borrows the forms from the cached snapshot so a hit never copies the list.
#[derive(Debug, Clone, Serialize)]
pub struct FormsResponse<'a> {
    /// Forms in snapshot order, after any request filters
    pub results: Vec<&'a Form>,
    /// Number of entries in `results`
    pub total: usize,
}

impl<'a> FormsResponse<'a> {
    /// Creates a new FormsResponse; `total` follows the result length.
    pub fn new(results: Vec<&'a Form>) -> Self {
        let total = results.len();
        Self { results, total }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Requests answered from the snapshot
    pub hits: u64,
    /// Requests that needed an upstream fetch
    pub misses: u64,
    /// Completed upstream aggregations
    pub upstream_fetches: u64,
    /// Upstream aggregations that failed
    pub failed_fetches: u64,
    /// Upstream pages consumed across all fetches
    pub pages_fetched: u64,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
    /// Number of forms in the current snapshot, if any
    pub cached_forms: Option<usize>,
    /// Age of the current snapshot in seconds, if any
    pub snapshot_age_secs: Option<u64>,
}

impl StatsResponse {
    /// Creates a new StatsResponse from cache statistics and snapshot info
    pub fn new(
        stats: &CacheStats,
        cached_forms: Option<usize>,
        snapshot_age_secs: Option<u64>,
    ) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            upstream_fetches: stats.upstream_fetches,
            failed_fetches: stats.failed_fetches,
            pages_fetched: stats.pages_fetched,
            hit_rate: stats.hit_rate(),
            cached_forms,
            snapshot_age_secs,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Crate version
    pub version: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
