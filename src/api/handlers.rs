//! API Handlers
//!
//! HTTP request handlers for each proxy endpoint.

use std::sync::Arc;

use axum::{
    extract::{RawQuery, State},
    http::{HeaderMap, HeaderName, HeaderValue, Method},
    response::{IntoResponse, Response},
    Json,
};

use crate::cache::SnapshotCache;
use crate::config::Config;
use crate::error::{ProxyError, Result};
use crate::models::{FormsQuery, FormsResponse, HealthResponse, StatsResponse};
use crate::proxy::{FormsProxy, FormsRequest};
use crate::upstream::HubSpotClient;

/// Request header the field extension uses to forward its credential
pub static API_KEY_HEADER: HeaderName = HeaderName::from_static("x-hubspot-api-key");

/// Cache status response header
pub static X_CACHE: HeaderName = HeaderName::from_static("x-cache");

/// Cache age response header, set on hits
pub static X_CACHE_AGE: HeaderName = HeaderName::from_static("x-cache-age");

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Cached aggregation proxy
    pub proxy: Arc<FormsProxy>,
    /// Server-side credential; takes precedence over the request header
    pub api_key: Option<String>,
}

impl AppState {
    /// Creates a new AppState around a proxy.
    pub fn new(proxy: FormsProxy, api_key: Option<String>) -> Self {
        Self {
            proxy: Arc::new(proxy),
            api_key,
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Builds the HubSpot client and an empty snapshot cache.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = HubSpotClient::from_config(config)?;
        let proxy = FormsProxy::new(
            Arc::new(client),
            Arc::new(SnapshotCache::new()),
            config.cache_duration(),
        );
        Ok(Self::new(proxy, config.api_key.clone()))
    }

    /// Picks the server credential, falling back to the request header.
    fn credential<'a>(&'a self, headers: &'a HeaderMap) -> Option<&'a str> {
        self.api_key.as_deref().or_else(|| {
            headers
                .get(&API_KEY_HEADER)
                .and_then(|value| value.to_str().ok())
        })
    }
}

/// Handler for /api/hubspot-forms
///
/// Answers GET with the aggregated form list and the `X-Cache` headers.
/// Every other method gets 405 before the query string, the cache, or the
/// upstream is looked at.
pub async fn forms_handler(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    RawQuery(raw_query): RawQuery,
) -> Result<Response> {
    if method != Method::GET {
        return Err(ProxyError::MethodNotAllowed);
    }
    let query = FormsQuery::from_query(raw_query.as_deref());

    let request = FormsRequest {
        force_refresh: query.force_refresh(),
        max_age: query.max_age(),
    };
    let forms = state
        .proxy
        .get_forms(state.credential(&headers), request)
        .await?;

    let filter = query.filter();
    let body = FormsResponse::new(filter.apply(&forms.snapshot.results));
    let mut response = Json(body).into_response();

    let response_headers = response.headers_mut();
    response_headers.insert(
        X_CACHE.clone(),
        HeaderValue::from_static(forms.status.as_header_value()),
    );
    if let Some(age) = forms.status.age_secs() {
        response_headers.insert(X_CACHE_AGE.clone(), HeaderValue::from(age));
    }

    Ok(response)
}

/// Handler for GET /stats
///
/// Returns cache counters and the state of the current snapshot.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.proxy.cache();
    let stats = cache.stats().await;
    let entry = cache.current().await;

    Json(StatsResponse::new(
        &stats,
        entry.as_ref().map(|e| e.snapshot.total),
        entry.as_ref().map(|e| e.age().as_secs()),
    ))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
