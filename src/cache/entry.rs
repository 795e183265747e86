//! Cache Entry Module
//!
//! Defines the cached snapshot and the metadata stored alongside it.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::time::Instant;

use crate::models::Form;

// == Forms Snapshot ==
/// Complete, sorted result of one successful aggregation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormsSnapshot {
    /// Forms in their final order
    pub results: Vec<Form>,
    /// Number of forms
    pub total: usize,
}

impl FormsSnapshot {
    /// Creates a snapshot; `total` follows the list length.
    pub fn new(results: Vec<Form>) -> Self {
        let total = results.len();
        Self { results, total }
    }
}

// == Cache Entry ==
/// A stored snapshot with its production time.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored snapshot, shared with in-flight responses
    pub snapshot: Arc<FormsSnapshot>,
    /// When the snapshot was produced
    pub fetched_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry stamped with the current time.
    pub fn new(snapshot: FormsSnapshot) -> Self {
        Self {
            snapshot: Arc::new(snapshot),
            fetched_at: Instant::now(),
        }
    }

    // == Age ==
    /// Time elapsed since the snapshot was produced.
    pub fn age(&self) -> Duration {
        Instant::now().saturating_duration_since(self.fetched_at)
    }

    // == Is Fresh ==
    /// Checks whether the entry may still be served.
    ///
    /// Boundary condition: an entry whose age equals `max_age` is stale, so a
    /// zero window never produces a hit.
    pub fn is_fresh(&self, max_age: Duration) -> bool {
        self.age() < max_age
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::upstream::testing::form;

    #[test]
    fn test_snapshot_total() {
        let snapshot = FormsSnapshot::new(vec![form("1", None), form("2", None)]);
        assert_eq!(snapshot.total, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_age() {
        let entry = CacheEntry::new(FormsSnapshot::new(Vec::new()));
        assert_eq!(entry.age(), Duration::ZERO);

        tokio::time::advance(Duration::from_secs(42)).await;
        assert_eq!(entry.age(), Duration::from_secs(42));
    }

    #[tokio::test(start_paused = true)]
    async fn test_freshness_boundary() {
        let entry = CacheEntry::new(FormsSnapshot::new(Vec::new()));
        let window = Duration::from_secs(300);

        tokio::time::advance(Duration::from_secs(299)).await;
        assert!(entry.is_fresh(window));

        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(!entry.is_fresh(window), "Entry should be stale at boundary");
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_window_never_fresh() {
        let entry = CacheEntry::new(FormsSnapshot::new(Vec::new()));
        assert!(!entry.is_fresh(Duration::ZERO));
    }
}
