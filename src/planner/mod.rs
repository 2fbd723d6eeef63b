//! Query Plan Composer
//!
//! Turns a `FilterSpec` plus fixed projection, relation, grouping and
//! ordering into parameterized SQL.
//!
//! # Guarantees
//!
//! - Clause order is fixed for every plan (see `clauses`)
//! - Placeholders are `$1..$n` in textual order; count equals params
//! - Filter values are always bound, never concatenated
//! - Only validated `LIMIT`/`OFFSET` numbers are interpolated

mod clauses;
mod explain;
mod pagination;
mod plan;
mod render;

pub use explain::ExplainPlan;
pub use pagination::{Pagination, DEFAULT_LIMIT, MAX_LIMIT};
pub use plan::{Predicate, QueryPlan, Relation, SortDirection};
pub use render::RenderedQuery;
