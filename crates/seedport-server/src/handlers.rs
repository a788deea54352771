//! HTTP request handlers for the legacy API.
//!
//! Clients now read the document store directly. Only the index and health
//! endpoints remain; every other `/api` route answers `410 Gone`.

use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router as AxumRouter,
};
use chrono::Utc;
use seedport_domain::timestamp::to_iso_millis;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::CorsLayer;

/// Body returned for retired routes
pub const DEPRECATION_MESSAGE: &str = "Deprecated: Frontend now reads directly from Firestore";

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// When the server started, for uptime reporting
    pub started_at: Arc<Instant>,
    /// Service name reported by the index route
    pub service_name: String,
    /// API version reported by the index route
    pub api_version: String,
}

impl AppState {
    /// State for a server starting now
    pub fn new() -> Self {
        Self {
            started_at: Arc::new(Instant::now()),
            service_name: "CMS Web Backend API".to_string(),
            api_version: "1.0.0".to_string(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Index response
#[derive(Debug, Serialize, Deserialize)]
pub struct IndexResponse {
    /// Service name
    pub message: String,
    /// API version
    pub version: String,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Always "healthy" while the process serves requests
    pub status: String,
    /// Current time, ISO-8601
    pub timestamp: String,
    /// Seconds since start
    pub uptime: f64,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// GET /api/
async fn index(State(state): State<AppState>) -> Json<IndexResponse> {
    Json(IndexResponse {
        message: state.service_name.clone(),
        version: state.api_version.clone(),
    })
}

/// GET /api/health
async fn health_check(State(state): State<AppState>) -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "healthy".to_string(),
        timestamp: to_iso_millis(&Utc::now()),
        uptime: state.started_at.elapsed().as_secs_f64(),
    })
}

/// Any other /api route
async fn deprecated() -> impl IntoResponse {
    (
        StatusCode::GONE,
        Json(ErrorResponse {
            error: DEPRECATION_MESSAGE.to_string(),
        }),
    )
}

/// Unrouted paths: retired under /api/, unknown elsewhere
async fn fallback(uri: Uri) -> Response {
    let path = uri.path();
    if path.starts_with("/api/") {
        return deprecated().await.into_response();
    }
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: format!("Not found: {}", path),
        }),
    )
        .into_response()
}

/// Create the axum router with all routes
pub fn create_router(state: AppState) -> AxumRouter {
    AxumRouter::new()
        .route("/api", get(index).fallback(deprecated))
        .route("/api/", get(index).fallback(deprecated))
        .route("/api/health", get(health_check).fallback(deprecated))
        .route("/api/health/", get(health_check).fallback(deprecated))
        .fallback(fallback)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt; // for oneshot

    #[tokio::test]
    async fn test_index() {
        let app = create_router(AppState::new());

        let request = Request::builder()
            .uri("/api/")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_post_to_health_is_gone() {
        let app = create_router(AppState::new());

        let request = Request::builder()
            .method("POST")
            .uri("/api/health")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::GONE);
    }
}
