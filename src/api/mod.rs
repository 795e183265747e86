//! API Module
//!
//! HTTP handlers and routing for the forms proxy.
//!
//! # Endpoints
//! - `GET /api/hubspot-forms` - Aggregated form list (`?refresh=true` bypasses the cache)
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::{create_router, FORMS_ROUTE};
