//! Snapshot ordering.
//!
//! Every snapshot is ordered newest-first by creation time. A missing or
//! unreadable timestamp orders as the Unix epoch.

use std::cmp::Reverse;

use crate::models::Form;

/// Sorts forms newest-first; stable for equal timestamps.
pub fn sort_newest_first(forms: &mut [Form]) {
    forms.sort_by_key(|form| Reverse(form.created_millis().unwrap_or(0)));
}
