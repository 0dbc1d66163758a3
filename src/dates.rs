//! Calendar arithmetic for due dates.
//!
//! Month addition clamps the day-of-month to the end of the target month,
//! so Jan 31 + 1 month lands on Feb 28 (or 29), never in March.

use chrono::{Datelike, NaiveDate};

pub const ISO_FORMAT: &str = "%Y-%m-%d";

/// Number of days in `month` (1-based) of `year`: the day before the first
/// of the following month.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let (next_year, next_month) = if month == 12 {
        (year.checked_add(1)?, 1)
    } else {
        (year, month + 1)
    };

    NaiveDate::from_ymd_opt(next_year, next_month, 1)?
        .pred_opt()
        .map(|last| last.day())
}

/// Advance `date` by `months` calendar months, clamping the day to the last
/// valid day of the target month. Negative `months` move backwards.
///
/// Returns `None` only when the result falls outside the range of dates
/// chrono can represent.
pub fn add_months(date: NaiveDate, months: i32) -> Option<NaiveDate> {
    let index = i64::from(date.year()) * 12 + i64::from(date.month0()) + i64::from(months);
    let year = i32::try_from(index.div_euclid(12)).ok()?;
    let month = index.rem_euclid(12) as u32 + 1;
    let day = date.day().min(days_in_month(year, month)?);

    NaiveDate::from_ymd_opt(year, month, day)
}

pub fn parse_iso(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), ISO_FORMAT).ok()
}

pub fn format_iso(date: NaiveDate) -> String {
    date.format(ISO_FORMAT).to_string()
}
