//! Unified error taxonomy for the analytics engine
//!
//! - `InvalidFilter` - malformed or out-of-range input, rejected before any query runs
//! - `Execution` - executor/backend failure, no partial result
//! - `NotFound` - a by-identifier lookup matched no row

use thiserror::Error;

use crate::executor::ExecutionError;
use crate::filter::InvalidFilterError;

/// Result type for engine operations
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

/// A single entity lookup that matched nothing.
///
/// Distinct from an empty aggregate, which is a valid zeroed result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: i64,
}

impl NotFoundError {
    pub fn new(entity: &'static str, id: i64) -> Self {
        Self { entity, id }
    }
}

/// Engine errors
#[derive(Debug, Clone, Error)]
pub enum AnalyticsError {
    #[error(transparent)]
    InvalidFilter(#[from] InvalidFilterError),

    #[error(transparent)]
    Execution(#[from] ExecutionError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),
}

impl AnalyticsError {
    /// Stable error code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            AnalyticsError::InvalidFilter(_) => "ANALYTICS_INVALID_FILTER",
            AnalyticsError::Execution(_) => "ANALYTICS_EXECUTION_FAILED",
            AnalyticsError::NotFound(_) => "ANALYTICS_NOT_FOUND",
        }
    }

    /// True when the caller sent something we cannot serve
    pub fn is_client_error(&self) -> bool {
        !matches!(self, AnalyticsError::Execution(_))
    }
}
