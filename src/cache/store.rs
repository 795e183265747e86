//! Snapshot Cache Module
//!
//! Holds the one cached snapshot per process, its statistics, and the refresh
//! lock that coalesces concurrent misses.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};

use crate::cache::{CacheEntry, CacheStats, FormsSnapshot};

#[derive(Debug, Default)]
struct Slot {
    /// Current snapshot, `None` until the first successful fetch
    entry: Option<CacheEntry>,
    /// Bumped on every store
    generation: u64,
    /// Bumped when a fetch starts; each fetch holds the value as its ticket
    started: u64,
    /// Ticket of the fetch that produced `entry`
    stored_ticket: u64,
    /// Performance statistics, hits excepted
    stats: CacheStats,
}

// == Snapshot Cache ==
/// Single-slot snapshot cache.
///
/// The slot is only ever replaced wholesale by `store`; nothing clears it.
#[derive(Debug, Default)]
pub struct SnapshotCache {
    slot: RwLock<Slot>,
    /// Counted outside the slot so hits only take the read lock
    hits: AtomicU64,
    refresh_lock: Arc<Mutex<()>>,
}

impl SnapshotCache {
    // == Constructor ==
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    // == Get Fresh ==
    /// Returns the entry if it is younger than `max_age`, counting a hit.
    ///
    /// A stale or missing entry is not counted here; the caller records the
    /// miss once it commits to a refresh.
    pub async fn get_fresh(&self, max_age: Duration) -> Option<CacheEntry> {
        let entry = {
            let slot = self.slot.read().await;
            slot.entry.as_ref().filter(|e| e.is_fresh(max_age)).cloned()
        };
        if entry.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        }
        entry
    }

    // == Current ==
    /// Returns the stored entry regardless of age.
    pub async fn current(&self) -> Option<CacheEntry> {
        self.slot.read().await.entry.clone()
    }

    // == Generation ==
    /// Number of snapshots stored so far.
    pub async fn generation(&self) -> u64 {
        self.slot.read().await.generation
    }

    // == Fetch Tickets ==
    /// Number of fetches started so far.
    pub async fn fetches_started(&self) -> u64 {
        self.slot.read().await.started
    }

    /// Ticket of the fetch behind the current snapshot, 0 when empty.
    pub async fn stored_ticket(&self) -> u64 {
        self.slot.read().await.stored_ticket
    }

    /// Registers the start of a fetch and returns its ticket.
    ///
    /// Call while holding the refresh lock, right before fetching.
    pub async fn begin_fetch(&self) -> u64 {
        let mut slot = self.slot.write().await;
        slot.started += 1;
        slot.started
    }

    // == Store ==
    /// Replaces the snapshot produced by fetch `ticket` and returns the new entry.
    pub async fn store(&self, snapshot: FormsSnapshot, pages: usize, ticket: u64) -> CacheEntry {
        let entry = CacheEntry::new(snapshot);
        let mut slot = self.slot.write().await;
        slot.entry = Some(entry.clone());
        slot.generation += 1;
        slot.stored_ticket = ticket;
        slot.stats.record_fetch(pages);
        entry
    }

    /// Counts a request that could not be served from the snapshot.
    pub async fn record_miss(&self) {
        self.slot.write().await.stats.record_miss();
    }

    /// Counts a failed refresh. The stored entry is left as is.
    pub async fn record_failure(&self) {
        self.slot.write().await.stats.record_failure();
    }

    // == Stats ==
    /// Returns a copy of the current statistics.
    pub async fn stats(&self) -> CacheStats {
        let mut stats = self.slot.read().await.stats.clone();
        stats.hits = self.hits.load(Ordering::Relaxed);
        stats
    }

    // == Refresh Lock ==
    /// Waits for exclusive rights to refresh the snapshot.
    ///
    /// The guard is owned so it can travel into a spawned refresh task.
    pub async fn lock_refresh(&self) -> OwnedMutexGuard<()> {
        Arc::clone(&self.refresh_lock).lock_owned().await
    }
}
