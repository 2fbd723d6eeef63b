//! Result Assembler
//!
//! Typed response documents and the coercions behind them.
//!
//! # Formatting rules
//!
//! - Counts are JSON integers
//! - Money and percentages are rounded half up to 2 places, JSON numbers
//! - Timestamps are `YYYY-MM-DDTHH:MM:SS`, dates `YYYY-MM-DD`
//! - Key sets are stable; empty input gives zeroed KPIs and empty lists

mod assemble;
mod coerce;
mod document;

pub use assemble::{assemble, AssemblyContext, RawRowsets};
pub use coerce::{
    apportion_percentages, percentage, round_half_up, IsoDate, IsoTimestamp, Money, Percent,
    DISPLAY_SCALE,
};
pub use document::{
    CatalogProduct, CategoryShare, ChannelSales, DailyRevenue, HourlySales, MenuEngineeringEntry,
    OptionEntry, OrderEntry, OrderKpis, OverviewDocument, ProductKpis, ProductListDocument,
    ProductPerformance, ProductsAnalyticDocument, ResultDocument, RevenuePoint,
    SalesDashboardDocument, StoreRevenue, TopProduct, UnitEntry, UnitKpis, UnitsOverviewDocument,
    WeekdaySales,
};
