//! Request DTOs for the forms proxy API
//!
//! Defines the query string accepted by the forms endpoint.

use std::time::Duration;

use crate::proxy::FormFilter;

/// Query string for `GET /api/hubspot-forms`
///
/// Every field is kept as raw text so that an odd value never turns into a
/// rejection; interpretation happens in the accessor methods.
///
/// # Fields
/// - `refresh`: `"true"` bypasses the cache
/// - `archived`: `"true"` or `"false"` keeps only archived or only live forms
/// - `search`: case-insensitive substring matched against form names
/// - `cacheHours`: freshness window override for this request, in hours
#[derive(Debug, Clone, Default)]
pub struct FormsQuery {
    pub refresh: Option<String>,
    pub archived: Option<String>,
    pub search: Option<String>,
    pub cache_hours: Option<String>,
}

impl FormsQuery {
    /// Parses a raw query string.
    ///
    /// The first occurrence of a repeated key wins and unknown keys are
    /// ignored. A query that is not valid form encoding reads as empty.
    pub fn from_query(raw: Option<&str>) -> Self {
        let pairs: Vec<(String, String)> = raw
            .and_then(|raw| serde_urlencoded::from_str(raw).ok())
            .unwrap_or_default();

        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "refresh" => &mut query.refresh,
                "archived" => &mut query.archived,
                "search" => &mut query.search,
                "cacheHours" => &mut query.cache_hours,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        query
    }

    /// True only for the literal `refresh=true`.
    pub fn force_refresh(&self) -> bool {
        self.refresh.as_deref() == Some("true")
    }

    /// Freshness window requested by the caller, if any.
    ///
    /// Unparseable values are ignored. The 0-168 hour range the field
    /// extension offers is not enforced here.
    pub fn max_age(&self) -> Option<Duration> {
        self.cache_hours
            .as_deref()
            .and_then(|hours| hours.trim().parse::<f64>().ok())
            .and_then(|hours| Duration::try_from_secs_f64(hours * 3600.0).ok())
    }

    /// Builds the response filter from `archived` and `search`.
    pub fn filter(&self) -> FormFilter {
        let archived = match self.archived.as_deref() {
            Some("true") => Some(true),
            Some("false") => Some(false),
            _ => None,
        };
        FormFilter::new(archived, self.search.clone())
    }
}
