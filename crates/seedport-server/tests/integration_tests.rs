//! Integration tests for the legacy API routes

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use seedport_server::handlers::{
    create_router, AppState, ErrorResponse, HealthCheckResponse, IndexResponse, DEPRECATION_MESSAGE,
};
use tower::ServiceExt; // for oneshot

async fn send(method: &str, uri: &str) -> (StatusCode, Vec<u8>) {
    let app = create_router(AppState::new());
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

#[tokio::test]
async fn test_index_endpoint() {
    let (status, body) = send("GET", "/api/").await;
    assert_eq!(status, StatusCode::OK);

    let index: IndexResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(index.message, "CMS Web Backend API");
    assert_eq!(index.version, "1.0.0");
}

#[tokio::test]
async fn test_index_without_trailing_slash() {
    let (status, body) = send("GET", "/api").await;
    assert_eq!(status, StatusCode::OK);

    let index: IndexResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(index.message, "CMS Web Backend API");
}

#[tokio::test]
async fn test_health_with_trailing_slash() {
    let (status, body) = send("GET", "/api/health/").await;
    assert_eq!(status, StatusCode::OK);

    let health: HealthCheckResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(health.status, "healthy");
}

#[tokio::test]
async fn test_health_endpoint() {
    let (status, body) = send("GET", "/api/health").await;
    assert_eq!(status, StatusCode::OK);

    let health: HealthCheckResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(health.status, "healthy");
    assert!(health.timestamp.ends_with('Z'));
    assert!(health.uptime >= 0.0);
}

#[tokio::test]
async fn test_retired_routes_are_gone() {
    for (method, uri) in [
        ("GET", "/api/cases"),
        ("POST", "/api/users"),
        ("DELETE", "/api/progress/p1"),
        ("PUT", "/api/"),
        ("POST", "/api"),
    ] {
        let (status, body) = send(method, uri).await;
        assert_eq!(status, StatusCode::GONE, "{} {}", method, uri);

        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.error, DEPRECATION_MESSAGE);
    }
}

#[tokio::test]
async fn test_routes_outside_api_not_found() {
    let (status, _) = send("GET", "/health").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
