//! CLI command implementations

use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use crate::aggregation::{AggregationKind, AggregationRequest, AnalyticsEngine};
use crate::error::AnalyticsError;
use crate::executor::PgExecutor;
use crate::filter::RawParams;
use crate::http_server::HttpServer;
use crate::observability::Logger;
use crate::planner::ExplainPlan;

use super::args::Command;
use super::config::Config;
use super::errors::{CliError, CliResult};

/// Entry point for main.rs
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    Logger::set_min_severity(cli.log_level);
    run_command(cli.command)
}

pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { config } => serve(&config),
        Command::Query {
            config,
            kind,
            params,
        } => query(&config, kind, params.into_iter().collect()),
        Command::Explain { kind, params } => explain(kind, params.into_iter().collect()),
    }
}

/// Serve the HTTP API until the listener fails
pub fn serve(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;
    let rt = runtime()?;

    rt.block_on(async {
        let executor = connect(&config).await?;
        let server = HttpServer::new(config.http.clone(), Arc::new(executor));
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Run one aggregation and print its document as JSON on stdout
pub fn query(config_path: &Path, kind: AggregationKind, raw: RawParams) -> CliResult<()> {
    let config = Config::load(config_path)?;
    let request = AggregationRequest::from_params(kind, &raw).map_err(AnalyticsError::from)?;

    let rt = runtime()?;
    let executor = rt.block_on(connect(&config))?;

    // The executor blocks on the runtime handle, so it runs outside `block_on`.
    let document = AnalyticsEngine::new(&executor).run(&request)?;
    write_json(&document.to_json()?)
}

/// Print the plans of an aggregation as a JSON array, without a database
pub fn explain(kind: AggregationKind, raw: RawParams) -> CliResult<()> {
    let request = AggregationRequest::from_params(kind, &raw).map_err(AnalyticsError::from)?;
    let plans: Vec<ExplainPlan> = request.plans().iter().map(ExplainPlan::from_plan).collect();
    write_json(&serde_json::to_string_pretty(&plans)?)
}

fn runtime() -> CliResult<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))
}

async fn connect(config: &Config) -> CliResult<PgExecutor> {
    let executor = PgExecutor::connect(&config.database_url, config.max_connections)
        .await
        .map_err(|e| CliError::boot_failed(format!("Database connection failed: {}", e.cause())))?;
    Logger::info(
        "DATABASE_POOL_READY",
        &[("max_connections", config.max_connections.to_string().as_str())],
    );
    Ok(executor)
}

fn write_json(json: &str) -> CliResult<()> {
    let mut stdout = io::stdout();
    writeln!(stdout, "{}", json)?;
    stdout.flush()?;
    Ok(())
}
