//! CLI argument definitions using clap
//!
//! Commands:
//! - restaurant-analytics serve --config <path>
//! - restaurant-analytics query --config <path> --kind <kind> [--param k=v]...
//! - restaurant-analytics explain --kind <kind> [--param k=v]...

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::aggregation::AggregationKind;
use crate::filter::RawParams;
use crate::observability::Severity;

/// Restaurant sales analytics over PostgreSQL
#[derive(Parser, Debug)]
#[command(name = "restaurant-analytics")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Lowest log severity written to stderr (info, warn, error)
    #[arg(long, global = true, default_value = "info", value_parser = parse_severity)]
    pub log_level: Severity,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the dashboard HTTP API
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./analytics.json")]
        config: PathBuf,
    },

    /// Run one aggregation and print its document
    Query {
        /// Path to configuration file
        #[arg(long, default_value = "./analytics.json")]
        config: PathBuf,

        /// Aggregation kind
        #[arg(long, value_parser = parse_kind)]
        kind: AggregationKind,

        /// Request parameter as key=value (repeatable)
        #[arg(long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,
    },

    /// Print the rendered plans of an aggregation without a database
    Explain {
        /// Aggregation kind
        #[arg(long, value_parser = parse_kind)]
        kind: AggregationKind,

        /// Request parameter as key=value (repeatable)
        #[arg(long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

fn parse_kind(raw: &str) -> Result<AggregationKind, String> {
    raw.parse()
}

fn parse_severity(raw: &str) -> Result<Severity, String> {
    raw.parse()
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    RawParams::parse_pair(raw).ok_or_else(|| format!("expected key=value, got '{}'", raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_query_command() {
        let cli = Cli::try_parse_from([
            "restaurant-analytics",
            "query",
            "--kind",
            "overview",
            "--param",
            "store_id=3",
            "--param",
            "start_date=2024-01-01",
        ])
        .unwrap();

        match cli.command {
            Command::Query { kind, params, .. } => {
                assert_eq!(kind, AggregationKind::Overview);
                assert_eq!(params.len(), 2);
                assert_eq!(params[0], ("store_id".to_string(), "3".to_string()));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_log_level() {
        let cli = Cli::try_parse_from(["restaurant-analytics", "explain", "--kind", "overview"])
            .unwrap();
        assert_eq!(cli.log_level, Severity::Info);

        let cli = Cli::try_parse_from([
            "restaurant-analytics",
            "explain",
            "--kind",
            "overview",
            "--log-level",
            "warn",
        ])
        .unwrap();
        assert_eq!(cli.log_level, Severity::Warn);

        let result = Cli::try_parse_from([
            "restaurant-analytics",
            "--log-level",
            "loud",
            "explain",
            "--kind",
            "overview",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_unknown_kind() {
        let result = Cli::try_parse_from(["restaurant-analytics", "explain", "--kind", "bogus"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_malformed_param() {
        let result = Cli::try_parse_from([
            "restaurant-analytics",
            "explain",
            "--kind",
            "overview",
            "--param",
            "store_id",
        ]);
        assert!(result.is_err());
    }
}
