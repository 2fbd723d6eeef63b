//! Executor error types
//!
//! Error code: ANALYTICS_EXECUTION_FAILED (ERROR)
//!
//! A failed execution is terminal for the request: the engine never retries
//! and never returns a partially assembled document.

use std::fmt;

/// Backend or decoding failure while running a plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionError {
    /// Underlying cause
    cause: String,
    /// Label of the plan that failed, once known
    plan: Option<String>,
}

impl ExecutionError {
    /// Create an execution error from a cause
    pub fn new(cause: impl Into<String>) -> Self {
        Self {
            cause: cause.into(),
            plan: None,
        }
    }

    /// Wrap any displayable backend error
    pub fn from_source(source: impl fmt::Display) -> Self {
        Self::new(source.to_string())
    }

    /// Column index past the end of the row
    pub fn missing_column(index: usize, len: usize) -> Self {
        Self::new(format!(
            "column {} requested but row has {} columns",
            index, len
        ))
    }

    /// Column holds a value of the wrong type
    pub fn unexpected_type(index: usize, expected: &str, found: &str) -> Self {
        Self::new(format!(
            "column {} expected {}, found {}",
            index, expected, found
        ))
    }

    /// Attach the label of the plan being executed
    pub fn in_plan(mut self, label: &str) -> Self {
        if self.plan.is_none() {
            self.plan = Some(label.to_string());
        }
        self
    }

    /// Returns the error code
    pub fn code(&self) -> &'static str {
        "ANALYTICS_EXECUTION_FAILED"
    }

    /// Returns the underlying cause
    pub fn cause(&self) -> &str {
        &self.cause
    }

    /// Returns the failing plan label if applicable
    pub fn plan(&self) -> Option<&str> {
        self.plan.as_deref()
    }
}

impl fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ERROR] {}: ", self.code())?;
        if let Some(plan) = &self.plan {
            write!(f, "plan '{}' failed: ", plan)?;
        }
        write!(f, "{}", self.cause)
    }
}

impl std::error::Error for ExecutionError {}

/// Result type for executor operations
pub type ExecutorResult<T> = Result<T, ExecutionError>;
