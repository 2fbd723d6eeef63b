//! PostgreSQL executor backed by a sqlx connection pool
//!
//! `execute` is synchronous: it blocks on the pool's runtime handle. Call it
//! from a blocking thread (`spawn_blocking`) or from outside the runtime.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use sqlx::postgres::{PgArguments, PgPoolOptions, PgRow};
use sqlx::query::Query;
use sqlx::{Column, PgPool, Postgres, Row as SqlxRow, TypeInfo};
use tokio::runtime::Handle;

use super::errors::{ExecutionError, ExecutorResult};
use super::executor::QueryExecutor;
use super::value::{Row, SqlValue};

/// Pooled PostgreSQL executor
#[derive(Debug, Clone)]
pub struct PgExecutor {
    pool: PgPool,
    runtime: Handle,
}

impl PgExecutor {
    /// Open a pool against `database_url`. Must be called inside a runtime.
    pub async fn connect(database_url: &str, max_connections: u32) -> ExecutorResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(ExecutionError::from_source)?;

        Ok(Self {
            pool,
            runtime: Handle::current(),
        })
    }

    async fn fetch(&self, sql: &str, params: &[SqlValue]) -> ExecutorResult<Vec<Row>> {
        let query = params
            .iter()
            .fold(sqlx::query(sql), |query, value| bind_value(query, value));

        // The pooled connection returns to the pool when the future completes.
        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(ExecutionError::from_source)?;

        rows.iter().map(decode_row).collect()
    }
}

impl QueryExecutor for PgExecutor {
    fn execute(&self, sql: &str, params: &[SqlValue]) -> ExecutorResult<Vec<Row>> {
        self.runtime.block_on(self.fetch(sql, params))
    }
}

fn bind_value<'q>(
    query: Query<'q, Postgres, PgArguments>,
    value: &SqlValue,
) -> Query<'q, Postgres, PgArguments> {
    match value {
        SqlValue::Null => query.bind(Option::<i64>::None),
        SqlValue::Bool(b) => query.bind(*b),
        SqlValue::Int(n) => query.bind(*n),
        SqlValue::Decimal(d) => query.bind(*d),
        SqlValue::Float(f) => query.bind(*f),
        SqlValue::Text(s) => query.bind(s.clone()),
        SqlValue::Date(d) => query.bind(*d),
        SqlValue::Timestamp(ts) => query.bind(*ts),
    }
}

fn decode_row(row: &PgRow) -> ExecutorResult<Row> {
    let values = row
        .columns()
        .iter()
        .map(|column| decode_column(row, column.ordinal(), column.type_info().name()))
        .collect::<ExecutorResult<Vec<_>>>()?;
    Ok(Row::new(values))
}

fn decode_column(row: &PgRow, index: usize, type_name: &str) -> ExecutorResult<SqlValue> {
    let value = match type_name {
        "BOOL" => row
            .try_get::<Option<bool>, _>(index)
            .map(|v| v.map(SqlValue::Bool)),
        "INT2" => row
            .try_get::<Option<i16>, _>(index)
            .map(|v| v.map(|n| SqlValue::Int(n.into()))),
        "INT4" => row
            .try_get::<Option<i32>, _>(index)
            .map(|v| v.map(|n| SqlValue::Int(n.into()))),
        "INT8" => row
            .try_get::<Option<i64>, _>(index)
            .map(|v| v.map(SqlValue::Int)),
        "NUMERIC" => row
            .try_get::<Option<Decimal>, _>(index)
            .map(|v| v.map(SqlValue::Decimal)),
        "FLOAT4" => row
            .try_get::<Option<f32>, _>(index)
            .map(|v| v.map(|f| SqlValue::Float(f.into()))),
        "FLOAT8" => row
            .try_get::<Option<f64>, _>(index)
            .map(|v| v.map(SqlValue::Float)),
        "DATE" => row
            .try_get::<Option<NaiveDate>, _>(index)
            .map(|v| v.map(SqlValue::Date)),
        "TIMESTAMP" => row
            .try_get::<Option<NaiveDateTime>, _>(index)
            .map(|v| v.map(SqlValue::Timestamp)),
        "TIMESTAMPTZ" => row
            .try_get::<Option<DateTime<Utc>>, _>(index)
            .map(|v| v.map(|ts| SqlValue::Timestamp(ts.naive_utc()))),
        _ => row
            .try_get::<Option<String>, _>(index)
            .map(|v| v.map(SqlValue::Text)),
    };

    value
        .map(|v| v.unwrap_or(SqlValue::Null))
        .map_err(|e| ExecutionError::new(format!("column {} ({}): {}", index, type_name, e)))
}
