//! Proxy Module
//!
//! Ties the upstream client to the snapshot cache and shapes what callers see.

mod filter;
mod service;
mod sort;


pub use filter::FormFilter;
pub use service::{CacheStatus, CachedForms, FormsProxy, FormsRequest};
pub use sort::sort_newest_first;
