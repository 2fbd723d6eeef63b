//! Aggregation requests
//!
//! A request pairs a kind with its restricted filter and a validated page
//! window. Everything that can be rejected is rejected here, before any plan
//! is composed.

use std::fmt;
use std::str::FromStr;

use crate::filter::{FilterField, FilterSpec, InvalidFilterError, RawParams};
use crate::planner::{Pagination, QueryPlan, DEFAULT_LIMIT, MAX_LIMIT};
use crate::result::AssemblyContext;

use super::{catalog, overview, products, sales, units};

/// Named analytics computation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregationKind {
    Overview,
    SalesDashboard,
    ProductsAnalytic,
    UnitsOverview,
    ProductList,
}

impl AggregationKind {
    pub const ALL: [AggregationKind; 5] = [
        AggregationKind::Overview,
        AggregationKind::SalesDashboard,
        AggregationKind::ProductsAnalytic,
        AggregationKind::UnitsOverview,
        AggregationKind::ProductList,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AggregationKind::Overview => "overview",
            AggregationKind::SalesDashboard => "sales_dashboard",
            AggregationKind::ProductsAnalytic => "products_analytic",
            AggregationKind::UnitsOverview => "units_overview",
            AggregationKind::ProductList => "product_list",
        }
    }

    /// Filter fields this kind honors; anything else is ignored
    pub fn accepted_filters(&self) -> &'static [FilterField] {
        use FilterField::*;
        match self {
            AggregationKind::Overview => &[DateRange, Store, Channel],
            AggregationKind::SalesDashboard => &[DateRange, Store, Channel, Weekday, HourRange],
            AggregationKind::ProductsAnalytic => {
                &[DateRange, Store, Channel, Category, Weekday, HourRange]
            }
            AggregationKind::UnitsOverview => &[DateRange, Channel, Status],
            AggregationKind::ProductList => &[Category],
        }
    }
}

impl fmt::Display for AggregationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AggregationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AggregationKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| {
                let names: Vec<&str> =
                    AggregationKind::ALL.iter().map(|k| k.as_str()).collect();
                format!("unknown kind '{}', expected one of: {}", s, names.join(", "))
            })
    }
}

/// One validated analytics request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationRequest {
    kind: AggregationKind,
    filter: FilterSpec,
    page: u32,
    pagination: Pagination,
}

impl AggregationRequest {
    /// Fields outside the kind's accepted set are dropped from `filter`.
    pub fn new(
        kind: AggregationKind,
        filter: FilterSpec,
        page: u32,
        limit: u32,
    ) -> Result<Self, InvalidFilterError> {
        let pagination = Pagination::for_page(page, limit)?;
        Ok(Self {
            kind,
            filter: filter.restrict(kind.accepted_filters()),
            page,
            pagination,
        })
    }

    /// Build from one raw parameter map (`page`, `limit` and filter keys)
    pub fn from_params(kind: AggregationKind, raw: &RawParams) -> Result<Self, InvalidFilterError> {
        let filter = FilterSpec::build(raw)?;
        let page = window_value(raw, "page", 1, u32::MAX)?;
        let limit = window_value(raw, "limit", DEFAULT_LIMIT, MAX_LIMIT)?;
        Self::new(kind, filter, page, limit)
    }

    pub fn kind(&self) -> AggregationKind {
        self.kind
    }

    pub fn filter(&self) -> &FilterSpec {
        &self.filter
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.pagination.limit()
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    pub fn context(&self) -> AssemblyContext {
        AssemblyContext {
            page: self.page,
            limit: self.limit(),
        }
    }

    /// Compose every plan this request needs, in execution order
    pub fn plans(&self) -> Vec<QueryPlan> {
        match self.kind {
            AggregationKind::Overview => overview::plans(self),
            AggregationKind::SalesDashboard => sales::plans(self),
            AggregationKind::ProductsAnalytic => products::plans(self),
            AggregationKind::UnitsOverview => units::plans(self),
            AggregationKind::ProductList => catalog::plans(self),
        }
    }
}

fn window_value(
    raw: &RawParams,
    key: &str,
    default: u32,
    max: u32,
) -> Result<u32, InvalidFilterError> {
    match raw.get_i64(key) {
        None => Ok(default),
        Some(value) => u32::try_from(value)
            .ok()
            .filter(|v| (1..=max).contains(v))
            .ok_or_else(|| InvalidFilterError::out_of_range(key, value, 1, max.into())),
    }
}
