//! Canonical filter clauses
//!
//! Clause order: date start, date end, store, channel, category, weekday,
//! hour start, hour end, status. Every clause carries exactly one
//! placeholder and one bound parameter.

use crate::executor::SqlValue;
use crate::filter::FilterSpec;

use super::plan::Predicate;

pub(crate) const DATE_FROM: &str = "s.created_at >= ?";
pub(crate) const DATE_UNTIL: &str = "s.created_at < ?";
pub(crate) const STORE: &str = "s.store_id = ?";
pub(crate) const CHANNEL: &str = "s.channel_id = ?";
pub(crate) const CATEGORY: &str = "p.category_id = ?";
pub(crate) const WEEKDAY: &str = "EXTRACT(DOW FROM s.created_at)::int = ?";
pub(crate) const HOUR_FROM: &str = "EXTRACT(HOUR FROM s.created_at)::int >= ?";
pub(crate) const HOUR_UNTIL: &str = "EXTRACT(HOUR FROM s.created_at)::int <= ?";
pub(crate) const STORE_ACTIVE: &str = "st.is_active = ?";

/// Predicates for every present filter field, in canonical order
pub(crate) fn predicates_for(filter: &FilterSpec) -> Vec<Predicate> {
    let mut predicates = Vec::new();

    if let Some(range) = filter.date_range() {
        if let Some(from) = range.from_instant() {
            predicates.push(Predicate::new(DATE_FROM, SqlValue::Timestamp(from)));
        }
        if let Some(until) = range.until_instant() {
            predicates.push(Predicate::new(DATE_UNTIL, SqlValue::Timestamp(until)));
        }
    }
    if let Some(id) = filter.store_id() {
        predicates.push(Predicate::new(STORE, id));
    }
    if let Some(id) = filter.channel_id() {
        predicates.push(Predicate::new(CHANNEL, id));
    }
    if let Some(id) = filter.category_id() {
        predicates.push(Predicate::new(CATEGORY, id));
    }
    if let Some(day) = filter.weekday() {
        predicates.push(Predicate::new(WEEKDAY, day));
    }
    if let Some(hours) = filter.hour_range() {
        if let Some(start) = hours.start() {
            predicates.push(Predicate::new(HOUR_FROM, start));
        }
        if let Some(end) = hours.end() {
            predicates.push(Predicate::new(HOUR_UNTIL, end));
        }
    }
    if let Some(status) = filter.status() {
        predicates.push(Predicate::new(STORE_ACTIVE, status.is_active()));
    }

    predicates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{RawParams, StoreStatus};

    #[test]
    fn test_empty_filter_has_no_clauses() {
        assert!(predicates_for(&FilterSpec::new()).is_empty());
    }

    #[test]
    fn test_canonical_order() {
        let raw = RawParams::new()
            .with("status", "inativa")
            .with("end_hour", "11")
            .with("start_hour", "6")
            .with("weekday", "2")
            .with("category_id", "4")
            .with("channel_id", "3")
            .with("store_id", "2")
            .with("end_date", "2024-01-31")
            .with("start_date", "2024-01-01");
        let filter = FilterSpec::build(&raw).unwrap();

        let templates: Vec<&str> = predicates_for(&filter)
            .iter()
            .map(|p| p.template())
            .collect();
        assert_eq!(
            templates,
            vec![
                DATE_FROM,
                DATE_UNTIL,
                STORE,
                CHANNEL,
                CATEGORY,
                WEEKDAY,
                HOUR_FROM,
                HOUR_UNTIL,
                STORE_ACTIVE
            ]
        );
    }

    #[test]
    fn test_status_binds_boolean() {
        let filter = FilterSpec::new().with_status(StoreStatus::Inactive);
        let predicates = predicates_for(&filter);
        assert_eq!(predicates[0].param(), &SqlValue::Bool(false));
    }

    #[test]
    fn test_single_hour_bound() {
        let filter = FilterSpec::new().with_hour_range(None, Some(14)).unwrap();
        let predicates = predicates_for(&filter);
        assert_eq!(predicates.len(), 1);
        assert_eq!(predicates[0].template(), HOUR_UNTIL);
        assert_eq!(predicates[0].param(), &SqlValue::Int(14));
    }
}
