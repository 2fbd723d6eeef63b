//! restaurant-analytics - Deterministic filter-and-aggregate analytics over restaurant sales
//!
//! Pipeline: raw parameters → `FilterSpec` → `QueryPlan`s → executor → rowsets → `ResultDocument`.

pub mod aggregation;
pub mod cli;
pub mod error;
pub mod executor;
pub mod filter;
pub mod http_server;
pub mod observability;
pub mod planner;
pub mod result;

pub use aggregation::{AggregationKind, AggregationRequest, AnalyticsEngine};
pub use error::{AnalyticsError, AnalyticsResult, NotFoundError};
pub use executor::{ExecutionError, QueryExecutor, Row, SqlValue};
pub use filter::{FilterSpec, InvalidFilterError, RawParams};
pub use planner::{Pagination, QueryPlan, RenderedQuery};
pub use result::ResultDocument;
