//! API Routes
//!
//! Configures the Axum router with all photo server endpoints.

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, options, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    add_details_handler, delete_details_handler, file_handler, get_details_handler,
    health_handler, image_handler, update_details_handler, upload_handler,
    upload_multiple_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /upload` - Store one `photo` file and create its record
/// - `POST /uploadMultiple` - Store up to 10 `photos` files in one record
/// - `GET /:filename` - Serve a stored file
/// - `GET /images/:id` - Fetch a record by id
/// - `POST /api/add-details` - Create a details record
/// - `OPTIONS /api/get-details` - Read a cached details entry
/// - `PUT /api/update-details/:id` - Overwrite an existing cached entry
/// - `DELETE /api/delete-details/:id` - Drop a cached entry
/// - `GET /health` - Health check with cache counters
///
/// # Middleware
/// - Body limit: disabled, uploads have no size cap
/// - CORS: Allows any origin on every route except `/api/get-details`.
///   `CorsLayer` answers every OPTIONS request itself, and get-details is
///   an OPTIONS route, so it sits outside the layer.
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/upload", post(upload_handler))
        .route("/uploadMultiple", post(upload_multiple_handler))
        .route("/health", get(health_handler))
        .route("/:filename", get(file_handler))
        .route("/images/:id", get(image_handler))
        .route("/api/add-details", post(add_details_handler))
        .route("/api/update-details/:id", put(update_details_handler))
        .route("/api/delete-details/:id", delete(delete_details_handler))
        // route_layer only wraps the routes registered above
        .route_layer(cors)
        .route("/api/get-details", options(get_details_handler))
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blobs::BlobStore;
    use crate::cache::{CacheKey, CacheStore};
    use crate::records::MemoryRecordStore;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::json;
    use std::sync::Arc;
    use tempfile::{tempdir, TempDir};
    use tower::util::ServiceExt;

    fn create_test_app() -> (Router, TempDir) {
        let dir = tempdir().unwrap();
        let state = AppState::new(
            CacheStore::new(100),
            Arc::new(MemoryRecordStore::new()),
            BlobStore::new(dir.path()),
        );
        (create_router(state), dir)
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let (app, _dir) = create_test_app();

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
    async fn test_missing_file_is_404() {
        let (app, _dir) = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/1700000000000.png")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn get_details_request(origin: Option<&str>, body: &str) -> Request<Body> {
        let mut builder = Request::builder()
            .method("OPTIONS")
            .uri("/api/get-details")
            .header("content-type", "application/json");
        if let Some(origin) = origin {
            builder = builder.header("origin", origin);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    #[tokio::test]
    async fn test_get_details_uses_options_method() {
        let (app, _dir) = create_test_app();

        let response = app
            .oneshot(get_details_request(None, r#"{"key":"absent"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Data not found in cache");
    }

    #[tokio::test]
    async fn test_get_details_reaches_handler_with_and_without_origin() {
        let dir = tempdir().unwrap();
        let state = AppState::new(
            CacheStore::new(100),
            Arc::new(MemoryRecordStore::new()),
            BlobStore::new(dir.path()),
        );
        state
            .cache
            .write()
            .await
            .set(CacheKey::from("k"), json!({"username": "a"}));
        let app = create_router(state);

        for origin in [None, Some("http://localhost:5173")] {
            let response = app
                .clone()
                .oneshot(get_details_request(origin, r#"{"key":"k"}"#))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::OK, "origin: {:?}", origin);
            let json = body_json(response).await;
            assert_eq!(json, json!({"data": {"username": "a"}}));
        }
    }

    #[tokio::test]
    async fn test_get_details_invalid_key_with_origin() {
        let (app, _dir) = create_test_app();

        let response = app
            .oneshot(get_details_request(
                Some("http://localhost:5173"),
                r#"{"key":[1]}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_cors_preflight_on_other_routes() {
        let (app, _dir) = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/upload")
                    .header("origin", "http://localhost:5173")
                    .header("access-control-request-method", "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
    }

    #[tokio::test]
    async fn test_upload_without_multipart_is_400() {
        let (app, _dir) = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/upload")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
