//! Forms API client
//!
//! `FormsSource` fetches single pages; its provided `fetch_all` walks the
//! cursor chain. `HubSpotClient` is the reqwest-backed implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::error::{ProxyError, Result};
use crate::models::Form;
use crate::upstream::FormsPage;

// == Public Constants ==
/// Path of the forms listing resource
pub const FORMS_PATH: &str = "/marketing/v3/forms";

/// Forms requested per page (upstream maximum)
pub const PAGE_SIZE: u32 = 100;

/// Hard ceiling on pages walked per fetch
pub const MAX_PAGES: usize = 20;

// == Fetched Forms ==
/// Result of one complete pagination walk.
#[derive(Debug, Clone, Default)]
pub struct FetchedForms {
    /// Forms from every page, in page order
    pub forms: Vec<Form>,
    /// Number of pages consumed
    pub pages: usize,
    /// True when the walk stopped at `MAX_PAGES` with a cursor still pending
    pub truncated: bool,
}

// == Forms Source ==
/// Anything that can serve pages of the forms listing.
#[async_trait]
pub trait FormsSource: Send + Sync {
    /// Fetches one page, continuing from `after` when given.
    async fn fetch_page(&self, credential: &str, after: Option<&str>) -> Result<FormsPage>;

    /// Fetches every page and concatenates the results.
    ///
    /// Any failed page aborts the whole walk; nothing gathered so far is
    /// returned. Reaching `MAX_PAGES` is not a failure.
    async fn fetch_all(&self, credential: &str) -> Result<FetchedForms> {
        let mut fetched = FetchedForms::default();
        let mut after: Option<String> = None;

        loop {
            debug!(page = fetched.pages + 1, "Fetching forms page");
            let page = self.fetch_page(credential, after.as_deref()).await?;
            fetched.pages += 1;

            after = page.next_cursor().map(str::to_owned);
            fetched.forms.extend(page.results);

            if after.is_none() {
                break;
            }
            if fetched.pages >= MAX_PAGES {
                warn!(max_pages = MAX_PAGES, "Reached maximum page limit");
                fetched.truncated = true;
                break;
            }
        }

        info!(
            forms = fetched.forms.len(),
            pages = fetched.pages,
            "Fetched forms from HubSpot"
        );
        Ok(fetched)
    }
}

// == HubSpot Client ==
/// HTTP client for the HubSpot marketing forms API.
#[derive(Debug, Clone)]
pub struct HubSpotClient {
    http: ReqwestClient,
    base_url: String,
}

impl HubSpotClient {
    /// Creates a client against `base_url` with a per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProxyError::Internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Creates a client from the server configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.api_base_url.clone(),
            Duration::from_secs(config.upstream_timeout_secs),
        )
    }

    /// Full URL of the forms listing resource.
    pub fn forms_url(&self) -> String {
        format!("{}{}", self.base_url, FORMS_PATH)
    }
}

#[async_trait]
impl FormsSource for HubSpotClient {
    async fn fetch_page(&self, credential: &str, after: Option<&str>) -> Result<FormsPage> {
        let mut request = self
            .http
            .get(self.forms_url())
            .bearer_auth(credential)
            .query(&[("limit", PAGE_SIZE.to_string())]);
        if let Some(after) = after {
            request = request.query(&[("after", after)]);
        }

        let response = request.send().await.map_err(|e| {
            error!(error = %e, "HubSpot request failed");
            ProxyError::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            error!(status = status.as_u16(), "HubSpot API error");
            return Err(ProxyError::Upstream {
                status: status.as_u16(),
            });
        }

        response.json::<FormsPage>().await.map_err(|e| {
            error!(error = %e, "Failed to decode HubSpot forms page");
            ProxyError::from(e)
        })
    }
}
