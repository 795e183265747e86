//! Cached aggregation over the upstream forms listing.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::cache::{CacheEntry, FormsSnapshot, SnapshotCache};
use crate::error::{ProxyError, Result};
use crate::proxy::sort_newest_first;
use crate::upstream::FormsSource;

// == Cache Status ==
/// How a request was answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// Served from the stored snapshot, which was `age` old
    Hit { age: Duration },
    /// Served from a fetch made for this request (or one it waited on)
    Miss,
}

impl CacheStatus {
    /// Value for the `X-Cache` response header.
    pub fn as_header_value(&self) -> &'static str {
        match self {
            CacheStatus::Hit { .. } => "HIT",
            CacheStatus::Miss => "MISS",
        }
    }

    /// Age in whole seconds, rounded to nearest, for hits.
    pub fn age_secs(&self) -> Option<u64> {
        match self {
            CacheStatus::Hit { age } => Some((age.as_millis() as u64 + 500) / 1000),
            CacheStatus::Miss => None,
        }
    }
}

// == Cached Forms ==
/// Snapshot handed back to a caller along with how it was obtained.
#[derive(Debug, Clone)]
pub struct CachedForms {
    pub snapshot: Arc<FormsSnapshot>,
    pub status: CacheStatus,
}

// == Forms Request ==
/// Options for one `get_forms` call.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormsRequest {
    /// Skip the freshness check and fetch upstream
    pub force_refresh: bool,
    /// Freshness window for this call; the proxy default when `None`
    pub max_age: Option<Duration>,
}

impl FormsRequest {
    pub fn cached() -> Self {
        Self::default()
    }

    pub fn refresh() -> Self {
        Self {
            force_refresh: true,
            max_age: None,
        }
    }
}

// == Forms Proxy ==
/// Serves the aggregated, newest-first form list from a time-boxed cache.
///
/// Concurrent misses are coalesced: callers queue on the cache's refresh lock
/// and a caller that finds a snapshot stored while it waited reuses it. A
/// forced refresh only reuses a fetch that started after it arrived. The
/// refresh itself runs on a spawned task, so a caller going away does not
/// abandon a fetch others may be waiting on.
pub struct FormsProxy {
    source: Arc<dyn FormsSource>,
    cache: Arc<SnapshotCache>,
    cache_duration: Duration,
}

impl FormsProxy {
    // == Constructor ==
    /// Creates a proxy over `source`, storing snapshots in `cache`.
    pub fn new(
        source: Arc<dyn FormsSource>,
        cache: Arc<SnapshotCache>,
        cache_duration: Duration,
    ) -> Self {
        Self {
            source,
            cache,
            cache_duration,
        }
    }

    pub fn cache(&self) -> &Arc<SnapshotCache> {
        &self.cache
    }

    pub fn cache_duration(&self) -> Duration {
        self.cache_duration
    }

    // == Get Forms ==
    /// Returns the form list, from the cache when fresh.
    ///
    /// A missing or blank credential fails before the cache or the upstream
    /// is touched. A failed fetch leaves any stored snapshot in place.
    pub async fn get_forms(
        &self,
        credential: Option<&str>,
        request: FormsRequest,
    ) -> Result<CachedForms> {
        let credential = credential
            .map(str::trim)
            .filter(|credential| !credential.is_empty())
            .ok_or_else(ProxyError::missing_credential)?;
        let max_age = request.max_age.unwrap_or(self.cache_duration);

        if !request.force_refresh {
            if let Some(entry) = self.cache.get_fresh(max_age).await {
                let age = entry.age();
                info!(age_secs = age.as_secs(), "Returning cached forms");
                return Ok(CachedForms {
                    snapshot: entry.snapshot,
                    status: CacheStatus::Hit { age },
                });
            }
        }

        self.cache.record_miss().await;
        let seen_generation = self.cache.generation().await;
        let seen_started = self.cache.fetches_started().await;
        let guard = self.cache.lock_refresh().await;

        // A snapshot landed while we were queued. A forced refresh only takes
        // it if that fetch started after this request arrived.
        let reusable = if request.force_refresh {
            self.cache.stored_ticket().await > seen_started
        } else {
            self.cache.generation().await != seen_generation
        };
        if reusable {
            if let Some(entry) = self.cache.current().await {
                debug!("Reusing snapshot fetched by a concurrent request");
                return Ok(CachedForms {
                    snapshot: entry.snapshot,
                    status: CacheStatus::Miss,
                });
            }
        }

        let ticket = self.cache.begin_fetch().await;
        let source = Arc::clone(&self.source);
        let cache = Arc::clone(&self.cache);
        let credential = credential.to_owned();
        let refresh = tokio::spawn(async move {
            let _guard = guard;
            refresh_snapshot(source.as_ref(), &cache, &credential, ticket).await
        });

        let entry = refresh
            .await
            .map_err(|e| ProxyError::Internal(format!("Refresh task failed: {e}")))??;

        Ok(CachedForms {
            snapshot: entry.snapshot,
            status: CacheStatus::Miss,
        })
    }
}

/// Fetches every page, sorts, and stores the result as the new snapshot.
async fn refresh_snapshot(
    source: &dyn FormsSource,
    cache: &SnapshotCache,
    credential: &str,
    ticket: u64,
) -> Result<CacheEntry> {
    match source.fetch_all(credential).await {
        Ok(fetched) => {
            let mut forms = fetched.forms;
            sort_newest_first(&mut forms);
            Ok(cache
                .store(FormsSnapshot::new(forms), fetched.pages, ticket)
                .await)
        }
        Err(err) => {
            warn!(error = %err, "Forms refresh failed, keeping previous snapshot");
            cache.record_failure().await;
            Err(err)
        }
    }
}
