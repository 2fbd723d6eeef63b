//! Positional values exchanged with the executor
//!
//! The same `SqlValue` type is used for bound parameters and for decoded
//! result columns.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::errors::{ExecutionError, ExecutorResult};

/// A single SQL value
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Bool(bool),
    Int(i64),
    Decimal(Decimal),
    Float(f64),
    Text(String),
    Date(NaiveDate),
    Timestamp(NaiveDateTime),
}

impl SqlValue {
    /// Type name used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            SqlValue::Null => "null",
            SqlValue::Bool(_) => "boolean",
            SqlValue::Int(_) => "integer",
            SqlValue::Decimal(_) => "decimal",
            SqlValue::Float(_) => "float",
            SqlValue::Text(_) => "text",
            SqlValue::Date(_) => "date",
            SqlValue::Timestamp(_) => "timestamp",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }

    /// JSON rendering for explain output
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            SqlValue::Null => serde_json::Value::Null,
            SqlValue::Bool(b) => serde_json::Value::Bool(*b),
            SqlValue::Int(n) => serde_json::Value::from(*n),
            SqlValue::Decimal(d) => serde_json::Value::String(d.to_string()),
            SqlValue::Float(f) => serde_json::Value::from(*f),
            SqlValue::Text(_) | SqlValue::Date(_) | SqlValue::Timestamp(_) => {
                serde_json::Value::String(self.to_string())
            }
        }
    }
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Null => write!(f, "NULL"),
            SqlValue::Bool(b) => write!(f, "{}", b),
            SqlValue::Int(n) => write!(f, "{}", n),
            SqlValue::Decimal(d) => write!(f, "{}", d),
            SqlValue::Float(x) => write!(f, "{}", x),
            SqlValue::Text(s) => write!(f, "{}", s),
            SqlValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            SqlValue::Timestamp(ts) => write!(f, "{}", ts.format("%Y-%m-%dT%H:%M:%S")),
        }
    }
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        SqlValue::Bool(v)
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::Int(v)
    }
}

impl From<u8> for SqlValue {
    fn from(v: u8) -> Self {
        SqlValue::Int(v.into())
    }
}

impl From<Decimal> for SqlValue {
    fn from(v: Decimal) -> Self {
        SqlValue::Decimal(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(v.to_string())
    }
}

impl From<NaiveDate> for SqlValue {
    fn from(v: NaiveDate) -> Self {
        SqlValue::Date(v)
    }
}

impl From<NaiveDateTime> for SqlValue {
    fn from(v: NaiveDateTime) -> Self {
        SqlValue::Timestamp(v)
    }
}

/// One positionally typed result row.
///
/// Accessors named `*_or_zero` resolve SQL NULL to zero, matching the
/// policy that absent aggregates are zero rather than missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    values: Vec<SqlValue>,
}

impl Row {
    pub fn new(values: Vec<SqlValue>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[SqlValue] {
        &self.values
    }

    pub fn get(&self, index: usize) -> ExecutorResult<&SqlValue> {
        self.values
            .get(index)
            .ok_or_else(|| ExecutionError::missing_column(index, self.values.len()))
    }

    /// Non-null integer (identifiers)
    pub fn int(&self, index: usize) -> ExecutorResult<i64> {
        match self.get(index)? {
            SqlValue::Null => Err(ExecutionError::unexpected_type(index, "integer", "null")),
            _ => self.int_or_zero(index),
        }
    }

    /// Integer, NULL as 0. Integral decimals (e.g. `SUM(bigint)`) are accepted.
    pub fn int_or_zero(&self, index: usize) -> ExecutorResult<i64> {
        let value = self.get(index)?;
        match value {
            SqlValue::Null => Ok(0),
            SqlValue::Int(n) => Ok(*n),
            SqlValue::Decimal(d) if d.fract().is_zero() => d
                .to_i64()
                .ok_or_else(|| ExecutionError::unexpected_type(index, "integer", "decimal")),
            SqlValue::Float(f) if f.fract() == 0.0 && f.is_finite() => Ok(*f as i64),
            other => Err(ExecutionError::unexpected_type(
                index,
                "integer",
                other.type_name(),
            )),
        }
    }

    /// Whole part of a numeric quantity, NULL as 0
    pub fn truncated_or_zero(&self, index: usize) -> ExecutorResult<i64> {
        match self.get(index)? {
            SqlValue::Decimal(d) => d
                .trunc()
                .to_i64()
                .ok_or_else(|| ExecutionError::unexpected_type(index, "integer", "decimal")),
            SqlValue::Float(f) if f.is_finite() => Ok(f.trunc() as i64),
            _ => self.int_or_zero(index),
        }
    }

    /// Non-negative count, NULL as 0
    pub fn count(&self, index: usize) -> ExecutorResult<u64> {
        let n = self.int_or_zero(index)?;
        u64::try_from(n).map_err(|_| {
            ExecutionError::new(format!("column {} holds negative count {}", index, n))
        })
    }

    /// Decimal, NULL as 0
    pub fn decimal_or_zero(&self, index: usize) -> ExecutorResult<Decimal> {
        Ok(self.decimal_opt(index)?.unwrap_or(Decimal::ZERO))
    }

    pub fn decimal_opt(&self, index: usize) -> ExecutorResult<Option<Decimal>> {
        match self.get(index)? {
            SqlValue::Null => Ok(None),
            SqlValue::Decimal(d) => Ok(Some(*d)),
            SqlValue::Int(n) => Ok(Some(Decimal::from(*n))),
            SqlValue::Float(f) => Decimal::from_f64_retain(*f)
                .map(Some)
                .ok_or_else(|| ExecutionError::unexpected_type(index, "decimal", "float")),
            other => Err(ExecutionError::unexpected_type(
                index,
                "decimal",
                other.type_name(),
            )),
        }
    }

    pub fn text_opt(&self, index: usize) -> ExecutorResult<Option<&str>> {
        match self.get(index)? {
            SqlValue::Null => Ok(None),
            SqlValue::Text(s) => Ok(Some(s.as_str())),
            other => Err(ExecutionError::unexpected_type(
                index,
                "text",
                other.type_name(),
            )),
        }
    }

    /// Text with a fallback for NULL
    pub fn text_or(&self, index: usize, default: &str) -> ExecutorResult<String> {
        Ok(self.text_opt(index)?.unwrap_or(default).to_string())
    }

    /// Boolean, NULL as false
    pub fn flag(&self, index: usize) -> ExecutorResult<bool> {
        match self.get(index)? {
            SqlValue::Null => Ok(false),
            SqlValue::Bool(b) => Ok(*b),
            other => Err(ExecutionError::unexpected_type(
                index,
                "boolean",
                other.type_name(),
            )),
        }
    }

    /// Date; timestamps are reduced to their calendar day
    pub fn date_opt(&self, index: usize) -> ExecutorResult<Option<NaiveDate>> {
        match self.get(index)? {
            SqlValue::Null => Ok(None),
            SqlValue::Date(d) => Ok(Some(*d)),
            SqlValue::Timestamp(ts) => Ok(Some(ts.date())),
            other => Err(ExecutionError::unexpected_type(
                index,
                "date",
                other.type_name(),
            )),
        }
    }

    /// Timestamp; dates are taken at midnight
    pub fn timestamp_opt(&self, index: usize) -> ExecutorResult<Option<NaiveDateTime>> {
        match self.get(index)? {
            SqlValue::Null => Ok(None),
            SqlValue::Timestamp(ts) => Ok(Some(*ts)),
            SqlValue::Date(d) => Ok(d.and_hms_opt(0, 0, 0)),
            other => Err(ExecutionError::unexpected_type(
                index,
                "timestamp",
                other.type_name(),
            )),
        }
    }
}

impl From<Vec<SqlValue>> for Row {
    fn from(values: Vec<SqlValue>) -> Self {
        Self::new(values)
    }
}
