//! Plan rendering
//!
//! Produces `$n`-numbered SQL text plus the ordered parameter list. A derived
//! relation's inner plan renders first, so its parameters take the lowest
//! numbers.

use crate::executor::SqlValue;

use super::plan::{QueryPlan, Relation};

/// Executable query text and its parameters
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedQuery {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

impl RenderedQuery {
    /// Number of `$n` placeholders in the text
    pub fn placeholder_count(&self) -> usize {
        let bytes = self.sql.as_bytes();
        bytes
            .iter()
            .enumerate()
            .filter(|(i, b)| {
                **b == b'$' && bytes.get(i + 1).is_some_and(|next| next.is_ascii_digit())
            })
            .count()
    }
}

impl QueryPlan {
    pub fn render(&self) -> RenderedQuery {
        let mut params = Vec::new();
        let body = self.render_body(&mut params);
        RenderedQuery {
            sql: format!("/* {} */ {}", self.label, body),
            params,
        }
    }

    fn render_body(&self, params: &mut Vec<SqlValue>) -> String {
        let relation = match &self.relation {
            Relation::Table(text) => (*text).to_string(),
            Relation::Derived { template, inner } => {
                let inner_sql = inner.render_body(params);
                template.replace("{inner}", &inner_sql)
            }
        };

        let mut sql = format!("SELECT {} FROM {}", self.projection, relation);

        if !self.predicates.is_empty() {
            let clauses: Vec<String> = self
                .predicates
                .iter()
                .map(|predicate| {
                    params.push(predicate.param().clone());
                    predicate
                        .template()
                        .replacen('?', &format!("${}", params.len()), 1)
                })
                .collect();
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }

        if !self.grouping.is_empty() {
            sql.push_str(" GROUP BY ");
            sql.push_str(&self.grouping.join(", "));
        }

        if !self.ordering.is_empty() {
            let keys: Vec<String> = self
                .ordering
                .iter()
                .map(|(key, direction)| format!("{} {}", key, direction.as_str()))
                .collect();
            sql.push_str(" ORDER BY ");
            sql.push_str(&keys.join(", "));
        }

        if let Some(page) = self.pagination {
            sql.push_str(&format!(" LIMIT {} OFFSET {}", page.limit(), page.offset()));
        }

        sql
    }
}
