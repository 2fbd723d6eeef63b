//! Observability HTTP Routes
//!
//! Liveness endpoints. Neither touches the database.

use axum::{http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Root banner
#[derive(Debug, Serialize)]
pub struct BannerResponse {
    pub message: &'static str,
}

pub const BANNER: &str = "API Online - Restaurant Analytics";

/// `/` and `/health`
pub fn health_routes() -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
}

async fn root_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(BannerResponse { message: BANNER }))
}

async fn health_handler() -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    };

    (StatusCode::OK, Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_serialization() {
        let response = HealthResponse {
            status: "ok",
            version: "0.1.0",
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("ok"));
    }

    #[test]
    fn test_banner_serialization() {
        let json = serde_json::to_string(&BannerResponse { message: BANNER }).unwrap();
        assert_eq!(json, r#"{"message":"API Online - Restaurant Analytics"}"#);
    }
}
