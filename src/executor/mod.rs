//! Query Executor
//!
//! Runs rendered queries and returns positionally typed rows.
//!
//! # Contract
//!
//! - Placeholders are `$1..$n`, bound in parameter order
//! - One call is one request/response; no retries
//! - Any backend or decoding failure is an `ExecutionError`
//!
//! `PgExecutor` is the production backend. Tests substitute their own
//! implementation of `QueryExecutor`.

mod errors;
#[allow(clippy::module_inception)]
mod executor;
mod postgres;
mod value;

pub use errors::{ExecutionError, ExecutorResult};
pub use executor::QueryExecutor;
pub use postgres::PgExecutor;
pub use value::{Row, SqlValue};
