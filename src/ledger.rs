//! Turns a new-entry request into a stored record.
//!
//! All validation happens in `build_record`, before the store is touched.
//! Due thresholds are computed once here and stored with the row.

use chrono::NaiveDate;

use crate::dates;
use crate::error::{LedgerError, Result};
use crate::record::{MaintenanceRecord, Money, Who};
use crate::store::Store;

/// Raw user intent for the `add` command. Text fields are validated by
/// `build_record`.
#[derive(Debug, Clone, Default)]
pub struct NewEntry {
    pub vehicle: String,
    pub odometer: String,
    pub job: String,
    pub date: Option<String>,
    pub parts: Option<String>,
    pub cost: Option<String>,
    pub who: Option<String>,
    pub torque_notes: Option<String>,
    pub interval_miles: Option<u64>,
    pub interval_months: Option<u32>,
}

pub fn build_record(entry: &NewEntry, today: NaiveDate) -> Result<MaintenanceRecord> {
    let vehicle = required("vehicle", &entry.vehicle)?;
    let job = required("job", &entry.job)?;

    let odometer = entry.odometer.trim().parse::<u64>().map_err(|_| {
        LedgerError::validation(format!(
            "odometer must be a non-negative whole number of miles, got '{}'",
            entry.odometer
        ))
    })?;

    let date = match &entry.date {
        Some(raw) => dates::parse_iso(raw).ok_or_else(|| {
            LedgerError::validation(format!("invalid date '{raw}': expected YYYY-MM-DD"))
        })?,
        None => today,
    };

    let cost = entry
        .cost
        .as_deref()
        .map(|raw| {
            Money::parse(raw).ok_or_else(|| {
                LedgerError::validation(format!("cost must be a non-negative amount, got '{raw}'"))
            })
        })
        .transpose()?;

    let who = match &entry.who {
        Some(raw) => raw.parse::<Who>().map_err(LedgerError::Validation)?,
        None => Who::default(),
    };

    let interval_miles = positive("interval-miles", entry.interval_miles)?;
    let interval_months = positive("interval-months", entry.interval_months)?;

    let next_due_miles = interval_miles
        .map(|miles| {
            odometer.checked_add(miles).ok_or_else(|| {
                LedgerError::validation("odometer plus interval-miles is out of range")
            })
        })
        .transpose()?;

    let next_due_date = interval_months
        .map(|months| {
            i32::try_from(months)
                .ok()
                .and_then(|m| dates::add_months(date, m))
                .ok_or_else(|| LedgerError::validation(format!("interval-months {months} is out of range")))
        })
        .transpose()?;

    Ok(MaintenanceRecord {
        date,
        vehicle,
        odometer,
        job,
        parts: non_blank(&entry.parts),
        cost,
        who,
        torque_notes: non_blank(&entry.torque_notes),
        interval_miles,
        interval_months,
        next_due_miles,
        next_due_date,
    })
}

/// Validate `entry`, append it to `store`, and return what was written.
pub fn add(store: &Store, entry: &NewEntry, today: NaiveDate) -> Result<MaintenanceRecord> {
    let record = build_record(entry, today)?;
    store.append(&record)?;
    log::info!("added {} {} on {}", record.vehicle, record.job, record.date);
    Ok(record)
}

/// Confirmation line printed after a successful add.
pub fn render_added(record: &MaintenanceRecord) -> String {
    format!(
        "Added: {} {} - {} @ {} mi",
        dates::format_iso(record.date),
        record.vehicle,
        record.job,
        record.odometer
    )
}

fn required(name: &str, value: &str) -> Result<String> {
    if value.trim().is_empty() {
        return Err(LedgerError::validation(format!("{name} is required")));
    }
    Ok(value.to_string())
}

fn positive<T: Copy + Default + PartialEq>(name: &str, value: Option<T>) -> Result<Option<T>> {
    match value {
        Some(v) if v == T::default() => {
            Err(LedgerError::validation(format!("{name} must be greater than zero")))
        }
        other => Ok(other),
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|s| !s.is_empty()).cloned()
}
