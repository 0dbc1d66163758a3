use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

use chrono::NaiveDate;

/// Who performed a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Who {
    /// Done by the owner. Stored as `Self`.
    #[default]
    Myself,
    Shop,
}

impl Who {
    pub fn as_str(&self) -> &'static str {
        match self {
            Who::Myself => "Self",
            Who::Shop => "Shop",
        }
    }
}

impl FromStr for Who {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Self" => Ok(Who::Myself),
            "Shop" => Ok(Who::Shop),
            other => Err(format!("invalid who '{other}': expected Self or Shop")),
        }
    }
}

impl fmt::Display for Who {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A non-negative amount of money held in whole cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    pub fn cents(&self) -> i64 {
        self.0
    }

    /// Parse a decimal amount, rounding to the nearest cent (half away from zero).
    /// Rejects negative, non-finite and out-of-range values.
    pub fn parse(s: &str) -> Option<Money> {
        let value: f64 = s.trim().parse().ok()?;
        if !value.is_finite() || value < 0.0 {
            return None;
        }

        let cents = (value * 100.0).round();
        if cents > i64::MAX as f64 {
            return None;
        }

        Some(Money(cents as i64))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        *self = *self + rhs;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

/// One logged service event. Immutable once written to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaintenanceRecord {
    pub date: NaiveDate,
    pub vehicle: String,
    pub odometer: u64,
    pub job: String,
    pub parts: Option<String>,
    pub cost: Option<Money>,
    pub who: Who,
    pub torque_notes: Option<String>,
    pub interval_miles: Option<u64>,
    pub interval_months: Option<u32>,
    pub next_due_miles: Option<u64>,
    pub next_due_date: Option<NaiveDate>,
}

impl MaintenanceRecord {
    /// Cost for aggregation purposes; a missing cost counts as zero.
    pub fn cost_or_zero(&self) -> Money {
        self.cost.unwrap_or(Money::ZERO)
    }
}

/// Render an optional value as its display form, or an empty string.
pub(crate) fn opt_display<T: fmt::Display>(value: &Option<T>) -> String {
    value.as_ref().map(ToString::to_string).unwrap_or_default()
}
