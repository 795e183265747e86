//! Upstream Module
//!
//! Client for the HubSpot marketing forms API and the pagination walk that
//! assembles a complete form list from it.

mod client;
mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{FetchedForms, FormsSource, HubSpotClient, FORMS_PATH, MAX_PAGES, PAGE_SIZE};
pub use types::{FormsPage, NextPage, Paging};
