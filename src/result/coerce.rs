//! Value coercions for result documents
//!
//! Money and percentages are `Decimal`, rounded half up to two places when
//! constructed, and serialized as JSON numbers.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Serialize, Serializer};

/// Decimal places kept for money and percentages
pub const DISPLAY_SCALE: u32 = 2;

/// Round half away from zero to `DISPLAY_SCALE` places
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// `part / whole * 100`, zero when `whole` is zero
pub fn percentage(part: Decimal, whole: Decimal) -> Percent {
    if whole.is_zero() {
        return Percent::zero();
    }
    Percent::new(part * Decimal::ONE_HUNDRED / whole)
}

/// Percentages of `values` over their sum, summing to exactly 100.00.
///
/// Largest remainder over hundredths of a percent. Ties go to the earlier
/// entry. All zero when the sum is zero.
pub fn apportion_percentages(values: &[Decimal]) -> Vec<Percent> {
    let total: Decimal = values.iter().copied().sum();
    if total <= Decimal::ZERO {
        return values.iter().map(|_| Percent::zero()).collect();
    }

    let scale = Decimal::from(10_000);
    let exact: Vec<Decimal> = values.iter().map(|v| *v * scale / total).collect();
    let mut units: Vec<i64> = exact
        .iter()
        .map(|e| e.floor().to_i64().unwrap_or(0))
        .collect();

    let assigned: i64 = units.iter().sum();
    let mut leftover = 10_000 - assigned;

    let mut order: Vec<usize> = (0..values.len()).collect();
    // stable sort keeps earlier index first among equal remainders
    order.sort_by(|a, b| {
        let ra = exact[*a] - exact[*a].floor();
        let rb = exact[*b] - exact[*b].floor();
        rb.cmp(&ra)
    });

    for index in order {
        if leftover <= 0 {
            break;
        }
        units[index] += 1;
        leftover -= 1;
    }

    units
        .into_iter()
        .map(|u| Percent::new(Decimal::new(u, DISPLAY_SCALE)))
        .collect()
}

fn serialize_decimal<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(value.to_f64().unwrap_or(0.0))
}

/// Monetary amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Money(Decimal);

impl Money {
    pub fn new(value: Decimal) -> Self {
        Money(round_half_up(value))
    }

    pub fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_decimal(&self.0, serializer)
    }
}

/// Percentage in [0, 100] for shares; margins may be negative
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Percent(Decimal);

impl Percent {
    pub fn new(value: Decimal) -> Self {
        Percent(round_half_up(value))
    }

    pub fn zero() -> Self {
        Percent(Decimal::ZERO)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl Serialize for Percent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_decimal(&self.0, serializer)
    }
}

/// `YYYY-MM-DDTHH:MM:SS`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IsoTimestamp(pub NaiveDateTime);

impl Serialize for IsoTimestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0.format("%Y-%m-%dT%H:%M:%S"))
    }
}

/// `YYYY-MM-DD`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IsoDate(pub NaiveDate);

impl Serialize for IsoDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0.format("%Y-%m-%d"))
    }
}
