//! Observability
//!
//! Structured JSON-line logging and lifecycle scopes.
//!
//! # Principles
//!
//! 1. Observability is read-only; it never alters a result
//! 2. No background threads or buffering
//! 3. Deterministic key ordering
//!
//! # Usage
//!
//! ```ignore
//! use restaurant_analytics::observability::{Logger, ObservationScope};
//!
//! Logger::info("SERVER_LISTENING", &[("addr", "0.0.0.0:8000")]);
//!
//! let scope = ObservationScope::with_fields("AGGREGATION", &[("kind", "overview")]);
//! scope.complete();
//! ```

mod logger;
mod scope;

pub use logger::{Logger, Severity};
pub use scope::{ObservationScope, Timer};
