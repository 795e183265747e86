//! Cache Module
//!
//! Single-slot, time-boxed snapshot cache for the aggregated form list.

mod entry;
mod stats;
mod store;

// Re-export public types
pub use entry::{CacheEntry, FormsSnapshot};
pub use stats::CacheStats;
pub use store::SnapshotCache;

// == Public Constants ==
/// Default snapshot freshness window in seconds (5 minutes)
pub const DEFAULT_CACHE_DURATION_SECS: u64 = 300;
