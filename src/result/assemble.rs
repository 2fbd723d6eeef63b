//! Result assembly
//!
//! Combines the named rowsets of one request into its document. A missing
//! rowset reads as empty, which yields zeroed KPI blocks and empty lists.

use std::collections::BTreeMap;

use crate::aggregation::{catalog, overview, products, sales, units, AggregationKind};
use crate::error::AnalyticsResult;
use crate::executor::Row;

use super::document::ResultDocument;

/// Rowsets keyed by plan label
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRowsets {
    sets: BTreeMap<&'static str, Vec<Row>>,
}

impl RawRowsets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, label: &'static str, rows: Vec<Row>) {
        self.sets.insert(label, rows);
    }

    pub fn with(mut self, label: &'static str, rows: Vec<Row>) -> Self {
        self.insert(label, rows);
        self
    }

    /// Rows for `label`; empty when the plan produced nothing
    pub fn rows(&self, label: &str) -> &[Row] {
        self.sets.get(label).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First row for `label`
    pub fn first(&self, label: &str) -> Option<&Row> {
        self.rows(label).first()
    }
}

/// Request-level values echoed into paginated documents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssemblyContext {
    pub page: u32,
    pub limit: u32,
}

/// Build the document for `kind` from its rowsets
pub fn assemble(
    kind: AggregationKind,
    context: &AssemblyContext,
    rowsets: &RawRowsets,
) -> AnalyticsResult<ResultDocument> {
    let document = match kind {
        AggregationKind::Overview => ResultDocument::Overview(overview::assemble(rowsets)?),
        AggregationKind::SalesDashboard => {
            ResultDocument::SalesDashboard(sales::assemble(context, rowsets)?)
        }
        AggregationKind::ProductsAnalytic => {
            ResultDocument::ProductsAnalytic(products::assemble(context, rowsets)?)
        }
        AggregationKind::UnitsOverview => {
            ResultDocument::UnitsOverview(units::assemble(context, rowsets)?)
        }
        AggregationKind::ProductList => {
            ResultDocument::ProductList(catalog::assemble(context, rowsets)?)
        }
    };
    Ok(document)
}
