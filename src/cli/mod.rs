//! CLI module
//!
//! Provides command-line interface for:
//! - serve: HTTP API over a PostgreSQL pool
//! - query: one aggregation, document printed to stdout
//! - explain: rendered plans, no database needed

mod args;
mod commands;
mod config;
mod errors;

pub use args::{Cli, Command};
pub use commands::{explain, query, run, run_command, serve};
pub use config::{Config, DATABASE_URL_ENV};
pub use errors::{CliError, CliErrorCode, CliResult};
