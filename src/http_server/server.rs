//! # HTTP Server
//!
//! Combines the analytics routers behind one CORS layer.

use std::io;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::executor::QueryExecutor;
use crate::observability::Logger;

use super::config::HttpServerConfig;
use super::dashboard_routes::dashboard_routes;
use super::filter_routes::filter_routes;
use super::observability_routes::health_routes;
use super::product_routes::product_routes;
use super::state::AnalyticsState;
use super::unit_routes::unit_routes;

/// HTTP server for the analytics dashboard
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    pub fn new(config: HttpServerConfig, executor: Arc<dyn QueryExecutor>) -> Self {
        let router = Self::build_router(&config, AnalyticsState::new(executor));
        Self { config, router }
    }

    fn build_router(config: &HttpServerConfig, state: AnalyticsState) -> Router {
        let cors = match config.allowed_origins() {
            None => CorsLayer::new().allow_origin(Any),
            Some(origins) => CorsLayer::new().allow_origin(AllowOrigin::list(origins)),
        }
        .allow_methods(Any)
        .allow_headers(Any);

        Router::new()
            .merge(health_routes())
            .nest("/dashboard", dashboard_routes(state.clone()))
            .merge(product_routes(state.clone()))
            .nest("/units", unit_routes(state.clone()))
            .nest("/filtros", filter_routes(state))
            .layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Serve until the listener fails
    pub async fn start(self) -> Result<(), io::Error> {
        let addr = self.config.bind_addr()?;
        let listener = TcpListener::bind(addr).await?;
        Logger::info("HTTP_SERVER_LISTENING", &[("addr", addr.to_string().as_str())]);

        axum::serve(listener, self.router).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::{ExecutionError, ExecutorResult, Row, SqlValue};
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use std::sync::Mutex;
    use tower::ServiceExt;

    /// Returns no rows, or fails every query when `fail` is set
    struct StubExecutor {
        fail: bool,
        calls: Mutex<Vec<String>>,
    }

    impl StubExecutor {
        fn empty() -> Arc<Self> {
            Arc::new(Self {
                fail: false,
                calls: Mutex::new(Vec::new()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                fail: true,
                calls: Mutex::new(Vec::new()),
            })
        }
    }

    impl QueryExecutor for StubExecutor {
        fn execute(&self, sql: &str, _params: &[SqlValue]) -> ExecutorResult<Vec<Row>> {
            self.calls.lock().unwrap().push(sql.to_string());
            if self.fail {
                Err(ExecutionError::new("connection refused"))
            } else {
                Ok(Vec::new())
            }
        }
    }

    fn router(executor: Arc<StubExecutor>) -> Router {
        HttpServer::new(HttpServerConfig::default(), executor).router()
    }

    async fn get(router: Router, uri: &str) -> (StatusCode, Value) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    #[test]
    fn test_server_creation() {
        let server = HttpServer::new(HttpServerConfig::with_port(9000), StubExecutor::empty());
        assert_eq!(server.socket_addr(), "0.0.0.0:9000");
    }

    #[tokio::test]
    async fn test_root_banner() {
        let (status, body) = get(router(StubExecutor::empty()), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "API Online - Restaurant Analytics");
    }

    #[tokio::test]
    async fn test_overview_on_empty_database() {
        let executor = StubExecutor::empty();
        let (status, body) = get(router(executor.clone()), "/dashboard/overview").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["kpis"]["total_pedidos"], 0);
        assert!(!executor.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_filter_is_bad_request_without_queries() {
        let executor = StubExecutor::empty();
        let (status, body) = get(router(executor.clone()), "/dashboard/sales?weekday=9").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "ANALYTICS_INVALID_FILTER");
        assert!(executor.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_execution_failure_is_server_error() {
        let (status, body) = get(router(StubExecutor::failing()), "/units/overview").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], "ANALYTICS_EXECUTION_FAILED");
    }

    #[tokio::test]
    async fn test_missing_product_is_not_found() {
        let (status, body) = get(router(StubExecutor::empty()), "/produtos/42").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "ANALYTICS_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_non_numeric_product_id_is_bad_request() {
        let executor = StubExecutor::empty();
        let (status, _) = get(router(executor.clone()), "/produtos/abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(executor.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_product_listing_with_and_without_slash() {
        for uri in ["/produtos", "/produtos/"] {
            let (status, body) = get(router(StubExecutor::empty()), uri).await;
            assert_eq!(status, StatusCode::OK, "{}", uri);
            assert_eq!(body["total_registros"], 0);
        }
    }

    #[tokio::test]
    async fn test_filter_options_empty() {
        let (status, body) = get(router(StubExecutor::empty()), "/filtros/canais").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!([]));
    }
}
