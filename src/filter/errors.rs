//! Filter validation errors
//!
//! Raised while normalizing raw request parameters, always before any query
//! is composed or executed.

use std::fmt;

/// A filter value that parsed but violates its declared range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidFilterError {
    field: String,
    reason: String,
}

impl InvalidFilterError {
    /// Create an error for the given raw parameter name
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create an out-of-range error
    pub fn out_of_range(field: impl Into<String>, value: i64, min: i64, max: i64) -> Self {
        Self::new(
            field,
            format!("value {} outside allowed range [{}, {}]", value, min, max),
        )
    }

    /// Parameter name that failed validation
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Human-readable reason
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl fmt::Display for InvalidFilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid filter '{}': {}", self.field, self.reason)
    }
}

impl std::error::Error for InvalidFilterError {}
