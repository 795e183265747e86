//! Request and Response models for the forms proxy API
//!
//! This module defines the form record and the DTOs used for
//! serializing/deserializing HTTP query strings and response bodies.

pub mod form;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use form::{Archived, CreatedAt, Form};
pub use requests::FormsQuery;
pub use responses::{ErrorResponse, FormsResponse, HealthResponse, StatsResponse};
