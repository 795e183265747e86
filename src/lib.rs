//! HubSpot Forms Proxy - A caching aggregation proxy for HubSpot marketing forms
//!
//! Walks the paginated forms API, orders the result newest-first, and serves
//! it from a short-lived in-process snapshot.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod proxy;
pub mod upstream;

pub use api::AppState;
pub use config::Config;
pub use error::{ProxyError, Result};
pub use proxy::{FormsProxy, FormsRequest};
pub use upstream::{FormsSource, HubSpotClient};
