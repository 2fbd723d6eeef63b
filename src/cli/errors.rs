//! CLI-specific error types
//!
//! All CLI errors end the process with a non-zero status.

use std::fmt;
use std::io;

use crate::error::AnalyticsError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdout)
    IoError,
    /// Runtime, pool or listener could not start
    BootFailed,
    /// The requested aggregation failed
    QueryFailed,
}

impl CliErrorCode {
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "ANALYTICS_CLI_CONFIG_ERROR",
            Self::IoError => "ANALYTICS_CLI_IO_ERROR",
            Self::BootFailed => "ANALYTICS_CLI_BOOT_FAILED",
            Self::QueryFailed => "ANALYTICS_CLI_QUERY_FAILED",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    pub fn boot_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::BootFailed, msg)
    }

    pub fn query_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::QueryFailed, msg)
    }

    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<AnalyticsError> for CliError {
    fn from(e: AnalyticsError) -> Self {
        Self::query_failed(format!("{} ({})", e, e.code()))
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::InvalidFilterError;

    #[test]
    fn test_codes_are_prefixed() {
        assert_eq!(
            CliError::config_error("x").code_str(),
            "ANALYTICS_CLI_CONFIG_ERROR"
        );
        assert_eq!(CliError::boot_failed("x").code_str(), "ANALYTICS_CLI_BOOT_FAILED");
    }

    #[test]
    fn test_from_analytics_error_keeps_code() {
        let err = CliError::from(AnalyticsError::from(InvalidFilterError::new("weekday", "bad")));
        assert_eq!(err.code(), &CliErrorCode::QueryFailed);
        assert!(err.message().contains("ANALYTICS_INVALID_FILTER"));
    }
}
