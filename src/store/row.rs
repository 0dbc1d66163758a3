//! On-disk row shape and its conversion to `MaintenanceRecord`.
//!
//! Every column is text on disk; an empty string means the value is absent.
//! Required columns must parse or the row is malformed. Optional columns that do
//! not parse are dropped to `None` and logged; a `None` threshold is never due.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dates;
use crate::error::{LedgerError, Result};
use crate::record::{opt_display, MaintenanceRecord, Money, Who};

/// Header row, in on-disk order.
pub const COLUMNS: [&str; 12] = [
    "date",
    "vehicle",
    "odometer",
    "job",
    "parts",
    "cost",
    "who",
    "torque_notes",
    "interval_miles",
    "interval_months",
    "next_due_miles",
    "next_due_date",
];

// field order must match COLUMNS, rows are written without headers
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoredRow {
    pub date: String,
    pub vehicle: String,
    pub odometer: String,
    pub job: String,
    pub parts: String,
    pub cost: String,
    pub who: String,
    pub torque_notes: String,
    pub interval_miles: String,
    pub interval_months: String,
    pub next_due_miles: String,
    pub next_due_date: String,
}

impl From<&MaintenanceRecord> for StoredRow {
    fn from(record: &MaintenanceRecord) -> Self {
        StoredRow {
            date: dates::format_iso(record.date),
            vehicle: record.vehicle.clone(),
            odometer: record.odometer.to_string(),
            job: record.job.clone(),
            parts: record.parts.clone().unwrap_or_default(),
            cost: opt_display(&record.cost),
            who: record.who.as_str().to_string(),
            torque_notes: record.torque_notes.clone().unwrap_or_default(),
            interval_miles: opt_display(&record.interval_miles),
            interval_months: opt_display(&record.interval_months),
            next_due_miles: opt_display(&record.next_due_miles),
            next_due_date: record.next_due_date.map(dates::format_iso).unwrap_or_default(),
        }
    }
}

impl StoredRow {
    /// Validate a raw row read from `line` of the store.
    pub fn into_record(self, line: u64) -> Result<MaintenanceRecord> {
        let malformed = |message: String| LedgerError::Parse { line, message };

        let date = dates::parse_iso(&self.date)
            .ok_or_else(|| malformed(format!("invalid date '{}'", self.date)))?;

        if self.vehicle.trim().is_empty() {
            return Err(malformed("missing vehicle".to_string()));
        }
        if self.job.trim().is_empty() {
            return Err(malformed("missing job".to_string()));
        }

        let odometer = self
            .odometer
            .trim()
            .parse::<u64>()
            .map_err(|_| malformed(format!("invalid odometer '{}'", self.odometer)))?;

        let who = if self.who.is_empty() {
            Who::default()
        } else {
            self.who.parse::<Who>().map_err(malformed)?
        };

        let cost = optional_with(line, "cost", &self.cost, Money::parse);
        let next_due_date = optional_with(line, "next_due_date", &self.next_due_date, dates::parse_iso);

        Ok(MaintenanceRecord {
            date,
            vehicle: self.vehicle,
            odometer,
            job: self.job,
            parts: non_empty(self.parts),
            cost,
            who,
            torque_notes: non_empty(self.torque_notes),
            interval_miles: optional(line, "interval_miles", &self.interval_miles),
            interval_months: optional(line, "interval_months", &self.interval_months),
            next_due_miles: optional(line, "next_due_miles", &self.next_due_miles),
            next_due_date,
        })
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn optional<T: FromStr>(line: u64, column: &str, raw: &str) -> Option<T> {
    optional_with(line, column, raw, |s| s.trim().parse::<T>().ok())
}

fn optional_with<T>(line: u64, column: &str, raw: &str, parse: impl Fn(&str) -> Option<T>) -> Option<T> {
    if raw.trim().is_empty() {
        return None;
    }

    let parsed = parse(raw);
    if parsed.is_none() {
        log::debug!("line {line}: ignoring malformed {column} '{raw}'");
    }
    parsed
}
