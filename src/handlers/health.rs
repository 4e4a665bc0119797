use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

/// Health check endpoint
/// Returns 200 OK if the service is running
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({
        "status": "healthy",
        "service": "cost-diagnosis",
        "version": env!("CARGO_PKG_VERSION"),
    })))
}

/// Readiness check endpoint
/// Returns 200 OK if the service is ready to accept traffic
pub async fn readiness_check() -> impl IntoResponse {
    // Catalog and database are loaded before the listener binds, so
    // reachable means ready.
    (StatusCode::OK, Json(json!({
        "status": "ready",
        "service": "cost-diagnosis",
    })))
}
