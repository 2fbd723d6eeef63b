//! Aggregation Engine
//!
//! One module per aggregation kind. Each composes its plans from the
//! request's `FilterSpec` and assembles its document from the resulting
//! rowsets.
//!
//! # Policies
//!
//! - Ranking ties fall to identifier ascending
//! - NULL aggregates resolve to zero
//! - Money and percentages round half up to 2 places
//! - Rankings are computed over the full filtered set

pub mod catalog;
mod engine;
mod kpis;
pub mod overview;
pub mod products;
mod request;
pub mod sales;
pub mod units;

pub use engine::AnalyticsEngine;
pub use products::ASSUMED_COST_RATIO;
pub use request::{AggregationKind, AggregationRequest};
