//! API Routes
//!
//! Configures the Axum router with all proxy endpoints.

use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::{any, get},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    forms_handler, health_handler, stats_handler, AppState, API_KEY_HEADER, X_CACHE, X_CACHE_AGE,
};

/// Path of the forms endpoint
pub const FORMS_ROUTE: &str = "/api/hubspot-forms";

/// Creates the main router with all endpoints configured.
///
/// The forms route accepts any method so that non-GET requests receive the
/// JSON 405 envelope rather than an empty body.
///
/// # Middleware
/// - CORS: any origin, GET, `Content-Type` and the credential header; the
///   cache headers are exposed to the browser
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers([CONTENT_TYPE, API_KEY_HEADER.clone()])
        .expose_headers([X_CACHE.clone(), X_CACHE_AGE.clone()]);

    // Build router with all endpoints
    Router::new()
        .route(FORMS_ROUTE, any(forms_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use crate::cache::SnapshotCache;
    use crate::proxy::FormsProxy;
    use crate::upstream::testing::{form, ScriptedSource};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt;

    fn create_test_app(source: Arc<ScriptedSource>, api_key: Option<&str>) -> Router {
        let proxy = FormsProxy::new(
            source,
            Arc::new(SnapshotCache::new()),
            Duration::from_secs(300),
        );
        create_router(AppState::new(proxy, api_key.map(str::to_string)))
    }

    fn source() -> Arc<ScriptedSource> {
        Arc::new(ScriptedSource::new(vec![vec![form("1", None)]]))
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_test_app(source(), None);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_stats_endpoint() {
        let app = create_test_app(source(), None);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/stats")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_forms_endpoint_cors_and_cache_headers() {
        let app = create_test_app(source(), Some("token"));

        let response = app
            .oneshot(
                Request::builder()
                    .uri(FORMS_ROUTE)
                    .header("origin", "https://plugins.example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
        assert_eq!(response.headers()["x-cache"], "MISS");
    }

    #[tokio::test]
    async fn test_forms_endpoint_post_not_allowed() {
        let source = source();
        let app = create_test_app(source.clone(), Some("token"));

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(FORMS_ROUTE)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn test_post_with_repeated_query_keys_not_allowed() {
        let source = source();
        let app = create_test_app(source.clone(), Some("token"));

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(format!("{FORMS_ROUTE}?refresh=true&refresh=true"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["error"], "Method not allowed");
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn test_cors_preflight() {
        let app = create_test_app(source(), Some("token"));

        let response = app
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri(FORMS_ROUTE)
                    .header("origin", "https://plugins.example.com")
                    .header("access-control-request-method", "GET")
                    .header("access-control-request-headers", "x-hubspot-api-key")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
        assert_eq!(response.headers()["access-control-allow-methods"], "GET");
    }
}
