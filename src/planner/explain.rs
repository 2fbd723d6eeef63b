//! Explain output
//!
//! Deterministic, serializable view of a rendered plan, used by the
//! `explain` command.

use std::fmt;

use serde::Serialize;

use super::plan::QueryPlan;

/// One rendered plan
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExplainPlan {
    /// Plan label
    pub label: String,
    /// Rendered SQL text
    pub sql: String,
    /// Bound parameters in placeholder order
    pub params: Vec<serde_json::Value>,
}

impl ExplainPlan {
    pub fn from_plan(plan: &QueryPlan) -> Self {
        let rendered = plan.render();
        Self {
            label: plan.label().to_string(),
            sql: rendered.sql,
            params: rendered.params.iter().map(|p| p.to_json()).collect(),
        }
    }
}

impl fmt::Display for ExplainPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "PLAN {}", self.label)?;
        writeln!(f, "  sql: {}", self.sql)?;
        for (i, param) in self.params.iter().enumerate() {
            writeln!(f, "  ${}: {}", i + 1, param)?;
        }
        Ok(())
    }
}
