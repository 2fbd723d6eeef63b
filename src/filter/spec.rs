//! Canonical filter specification
//!
//! Built once per request from raw parameters and read-only afterwards.
//! Unparseable values are treated as omitted; values that parse but fall
//! outside their declared range are rejected.

use chrono::{NaiveDate, NaiveDateTime};

use super::errors::InvalidFilterError;
use super::params::RawParams;

/// Highest weekday number (0 = Sunday, 6 = Saturday)
pub const MAX_WEEKDAY: u8 = 6;

/// Highest hour of day
pub const MAX_HOUR: u8 = 23;

/// Filter fields in canonical clause order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FilterField {
    DateRange,
    Store,
    Channel,
    Category,
    Weekday,
    HourRange,
    Status,
}

impl FilterField {
    /// All fields, in canonical order
    pub const ALL: [FilterField; 7] = [
        FilterField::DateRange,
        FilterField::Store,
        FilterField::Channel,
        FilterField::Category,
        FilterField::Weekday,
        FilterField::HourRange,
        FilterField::Status,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterField::DateRange => "date_range",
            FilterField::Store => "store_id",
            FilterField::Channel => "channel_id",
            FilterField::Category => "category_id",
            FilterField::Weekday => "weekday",
            FilterField::HourRange => "hour_range",
            FilterField::Status => "status",
        }
    }

    /// Fields that constrain the store itself rather than its sales
    pub fn is_store_side(&self) -> bool {
        matches!(self, FilterField::Status)
    }
}

/// Calendar-day range; either bound may be open.
///
/// Both bounds are inclusive whole days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

impl DateRange {
    /// Returns `Ok(None)` when both bounds are open.
    pub fn new(
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Option<Self>, InvalidFilterError> {
        if let (Some(s), Some(e)) = (start, end) {
            if s > e {
                return Err(InvalidFilterError::new(
                    "start_date",
                    format!("start_date {} is after end_date {}", s, e),
                ));
            }
        }
        if let Some(e) = end {
            if e.succ_opt().is_none() {
                return Err(InvalidFilterError::new("end_date", "date out of range"));
            }
        }
        if start.is_none() && end.is_none() {
            return Ok(None);
        }
        Ok(Some(Self { start, end }))
    }

    pub fn start(&self) -> Option<NaiveDate> {
        self.start
    }

    pub fn end(&self) -> Option<NaiveDate> {
        self.end
    }

    /// Midnight at the start of the first day
    pub fn from_instant(&self) -> Option<NaiveDateTime> {
        self.start.and_then(|d| d.and_hms_opt(0, 0, 0))
    }

    /// Midnight after the last day (exclusive upper bound)
    pub fn until_instant(&self) -> Option<NaiveDateTime> {
        self.end
            .and_then(|d| d.succ_opt())
            .and_then(|d| d.and_hms_opt(0, 0, 0))
    }
}

/// Hour-of-day range; both bounds inclusive, either may be open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourRange {
    start: Option<u8>,
    end: Option<u8>,
}

impl HourRange {
    /// Returns `Ok(None)` when both bounds are open.
    pub fn new(start: Option<u8>, end: Option<u8>) -> Result<Option<Self>, InvalidFilterError> {
        for (field, bound) in [("start_hour", start), ("end_hour", end)] {
            if let Some(hour) = bound {
                if hour > MAX_HOUR {
                    return Err(InvalidFilterError::out_of_range(
                        field,
                        hour.into(),
                        0,
                        MAX_HOUR.into(),
                    ));
                }
            }
        }
        if let (Some(s), Some(e)) = (start, end) {
            if s > e {
                return Err(InvalidFilterError::new(
                    "start_hour",
                    format!("start_hour {} is after end_hour {}", s, e),
                ));
            }
        }
        if start.is_none() && end.is_none() {
            return Ok(None);
        }
        Ok(Some(Self { start, end }))
    }

    pub fn start(&self) -> Option<u8> {
        self.start
    }

    pub fn end(&self) -> Option<u8> {
        self.end
    }
}

/// Store activity status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreStatus {
    Active,
    Inactive,
}

impl StoreStatus {
    /// Accepts the dashboard's Portuguese labels and English aliases.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "ativa" | "ativo" | "active" | "true" => Some(StoreStatus::Active),
            "inativa" | "inativo" | "inactive" | "false" => Some(StoreStatus::Inactive),
            _ => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, StoreStatus::Active)
    }

    /// Display label used in result documents
    pub fn label(&self) -> &'static str {
        match self {
            StoreStatus::Active => "Ativa",
            StoreStatus::Inactive => "Inativa",
        }
    }
}

/// Immutable, validated set of optional predicates for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    date_range: Option<DateRange>,
    store_id: Option<i64>,
    channel_id: Option<i64>,
    category_id: Option<i64>,
    weekday: Option<u8>,
    hour_range: Option<HourRange>,
    status: Option<StoreStatus>,
}

impl FilterSpec {
    /// Empty filter (matches the whole dataset)
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize raw parameters into a canonical filter.
    ///
    /// Blank and unparseable values are absent. Range violations fail.
    pub fn build(raw: &RawParams) -> Result<Self, InvalidFilterError> {
        let start = raw.get("start_date").and_then(parse_date);
        let end = raw.get("end_date").and_then(parse_date);

        let mut spec = FilterSpec::new().with_date_range(start, end)?;

        if let Some(id) = parse_identifier(raw, "store_id")? {
            spec = spec.with_store(id);
        }
        if let Some(id) = parse_identifier(raw, "channel_id")? {
            spec = spec.with_channel(id);
        }
        if let Some(id) = parse_identifier(raw, "category_id")? {
            spec = spec.with_category(id);
        }
        if let Some(day) = raw.get_i64("weekday") {
            spec = spec.with_weekday(checked_u8("weekday", day, MAX_WEEKDAY)?)?;
        }

        let start_hour = raw
            .get_i64("start_hour")
            .map(|h| checked_u8("start_hour", h, MAX_HOUR))
            .transpose()?;
        let end_hour = raw
            .get_i64("end_hour")
            .map(|h| checked_u8("end_hour", h, MAX_HOUR))
            .transpose()?;
        spec = spec.with_hour_range(start_hour, end_hour)?;

        if let Some(status) = raw.get("status").and_then(StoreStatus::parse) {
            spec = spec.with_status(status);
        }

        Ok(spec)
    }

    pub fn with_date_range(
        mut self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Self, InvalidFilterError> {
        self.date_range = DateRange::new(start, end)?;
        Ok(self)
    }

    pub fn with_store(mut self, store_id: i64) -> Self {
        self.store_id = Some(store_id);
        self
    }

    pub fn with_channel(mut self, channel_id: i64) -> Self {
        self.channel_id = Some(channel_id);
        self
    }

    pub fn with_category(mut self, category_id: i64) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_weekday(mut self, weekday: u8) -> Result<Self, InvalidFilterError> {
        if weekday > MAX_WEEKDAY {
            return Err(InvalidFilterError::out_of_range(
                "weekday",
                weekday.into(),
                0,
                MAX_WEEKDAY.into(),
            ));
        }
        self.weekday = Some(weekday);
        Ok(self)
    }

    pub fn with_hour_range(
        mut self,
        start: Option<u8>,
        end: Option<u8>,
    ) -> Result<Self, InvalidFilterError> {
        self.hour_range = HourRange::new(start, end)?;
        Ok(self)
    }

    pub fn with_status(mut self, status: StoreStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn date_range(&self) -> Option<&DateRange> {
        self.date_range.as_ref()
    }

    pub fn store_id(&self) -> Option<i64> {
        self.store_id
    }

    pub fn channel_id(&self) -> Option<i64> {
        self.channel_id
    }

    pub fn category_id(&self) -> Option<i64> {
        self.category_id
    }

    pub fn weekday(&self) -> Option<u8> {
        self.weekday
    }

    pub fn hour_range(&self) -> Option<&HourRange> {
        self.hour_range.as_ref()
    }

    pub fn status(&self) -> Option<StoreStatus> {
        self.status
    }

    /// Whether the given field is present
    pub fn has(&self, field: FilterField) -> bool {
        match field {
            FilterField::DateRange => self.date_range.is_some(),
            FilterField::Store => self.store_id.is_some(),
            FilterField::Channel => self.channel_id.is_some(),
            FilterField::Category => self.category_id.is_some(),
            FilterField::Weekday => self.weekday.is_some(),
            FilterField::HourRange => self.hour_range.is_some(),
            FilterField::Status => self.status.is_some(),
        }
    }

    /// Present fields in canonical order
    pub fn present_fields(&self) -> Vec<FilterField> {
        FilterField::ALL
            .into_iter()
            .filter(|f| self.has(*f))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.present_fields().is_empty()
    }

    /// Copy keeping only the listed fields
    pub fn restrict(&self, accepted: &[FilterField]) -> FilterSpec {
        let keep = |field: FilterField| accepted.contains(&field);
        FilterSpec {
            date_range: self.date_range.filter(|_| keep(FilterField::DateRange)),
            store_id: self.store_id.filter(|_| keep(FilterField::Store)),
            channel_id: self.channel_id.filter(|_| keep(FilterField::Channel)),
            category_id: self.category_id.filter(|_| keep(FilterField::Category)),
            weekday: self.weekday.filter(|_| keep(FilterField::Weekday)),
            hour_range: self.hour_range.filter(|_| keep(FilterField::HourRange)),
            status: self.status.filter(|_| keep(FilterField::Status)),
        }
    }

    /// Partition into (sales-side, store-side) filters
    pub fn split_store_side(&self) -> (FilterSpec, FilterSpec) {
        let (store, sales): (Vec<FilterField>, Vec<FilterField>) = FilterField::ALL
            .into_iter()
            .partition(|f| f.is_store_side());
        (self.restrict(&sales), self.restrict(&store))
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

fn parse_identifier(raw: &RawParams, key: &str) -> Result<Option<i64>, InvalidFilterError> {
    match raw.get_i64(key) {
        Some(id) if id <= 0 => Err(InvalidFilterError::new(
            key,
            format!("identifier must be positive, got {}", id),
        )),
        other => Ok(other),
    }
}

fn checked_u8(field: &str, value: i64, max: u8) -> Result<u8, InvalidFilterError> {
    u8::try_from(value)
        .ok()
        .filter(|v| *v <= max)
        .ok_or_else(|| InvalidFilterError::out_of_range(field, value, 0, max.into()))
}
