//! Shared test fixtures: a scripted executor keyed by plan label.

#![allow(dead_code)]

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Mutex;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use restaurant_analytics::executor::ExecutorResult;
use restaurant_analytics::{ExecutionError, QueryExecutor, Row, SqlValue};

/// One executed query
#[derive(Debug, Clone)]
pub struct Call {
    pub label: String,
    pub sql: String,
    pub params: Vec<SqlValue>,
}

/// Answers each plan with scripted rows (empty when unscripted) and records
/// every call. Optionally fails on one label.
#[derive(Default)]
pub struct FakeExecutor {
    responses: HashMap<String, Vec<Row>>,
    fail_on: Option<String>,
    calls: Mutex<Vec<Call>>,
}

impl FakeExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, label: &str, rows: Vec<Vec<SqlValue>>) -> Self {
        self.responses
            .insert(label.to_string(), rows.into_iter().map(Row::new).collect());
        self
    }

    pub fn fail_on(mut self, label: &str) -> Self {
        self.fail_on = Some(label.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn labels(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.label).collect()
    }

    pub fn call(&self, label: &str) -> Call {
        self.calls()
            .into_iter()
            .find(|c| c.label == label)
            .unwrap_or_else(|| panic!("plan {} was not executed", label))
    }
}

impl QueryExecutor for FakeExecutor {
    fn execute(&self, sql: &str, params: &[SqlValue]) -> ExecutorResult<Vec<Row>> {
        let label = label_of(sql);
        self.calls.lock().unwrap().push(Call {
            label: label.clone(),
            sql: sql.to_string(),
            params: params.to_vec(),
        });

        if self.fail_on.as_deref() == Some(label.as_str()) {
            return Err(ExecutionError::new("relation does not exist"));
        }
        Ok(self.responses.get(&label).cloned().unwrap_or_default())
    }
}

/// Label from the leading `/* label */` comment
pub fn label_of(sql: &str) -> String {
    sql.strip_prefix("/* ")
        .and_then(|rest| rest.split_once(" */"))
        .map(|(label, _)| label.to_string())
        .unwrap_or_default()
}

pub fn int(n: i64) -> SqlValue {
    SqlValue::Int(n)
}

pub fn dec(s: &str) -> SqlValue {
    SqlValue::Decimal(Decimal::from_str(s).unwrap())
}

pub fn text(s: &str) -> SqlValue {
    SqlValue::Text(s.to_string())
}

pub fn date(s: &str) -> SqlValue {
    SqlValue::Date(NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap())
}

pub fn ts(s: &str) -> SqlValue {
    SqlValue::Timestamp(NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap())
}

pub fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}
