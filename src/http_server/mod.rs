//! # HTTP Server Module
//!
//! Axum front end for the analytics engine.
//!
//! # Endpoints
//!
//! - `/` and `/health` - liveness
//! - `/dashboard/overview`, `/dashboard/sales`
//! - `/produtos/`, `/produtos/analitico`, `/produtos/:produto_id`
//! - `/units/overview`
//! - `/filtros/lojas`, `/filtros/canais`

pub mod config;
pub mod dashboard_routes;
pub mod errors;
pub mod filter_routes;
pub mod observability_routes;
pub mod product_routes;
pub mod server;
pub mod state;
pub mod unit_routes;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use server::HttpServer;
pub use state::AnalyticsState;
