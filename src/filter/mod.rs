//! Filter Specification Builder
//!
//! Normalizes raw optional request parameters into a canonical `FilterSpec`.
//!
//! # Rules
//!
//! - Blank or unparseable values are treated as omitted
//! - Range bounds (dates, hours) are independently optional
//! - `weekday` must be in [0, 6] (0 = Sunday), hours in [0, 23]
//! - Violations fail with `InvalidFilterError` before any query is built

mod errors;
mod params;
mod spec;

pub use errors::InvalidFilterError;
pub use params::RawParams;
pub use spec::{
    DateRange, FilterField, FilterSpec, HourRange, StoreStatus, MAX_HOUR, MAX_WEEKDAY,
};
