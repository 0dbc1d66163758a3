//! Due detection.
//!
//! A record is due by miles when a current odometer reading is supplied and
//! has reached its `next_due_miles`, and due by date when `today` has reached
//! its `next_due_date`. The two checks are independent. A threshold that was
//! missing or unreadable in the store is `None` and never marks a record due.

use std::fmt;

use chrono::NaiveDate;

use crate::dates;
use crate::record::{opt_display, MaintenanceRecord};

use super::{by_vehicle_then_date, matches_vehicle};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DueFlags {
    pub miles: bool,
    pub date: bool,
}

impl DueFlags {
    pub fn any(&self) -> bool {
        self.miles || self.date
    }
}

impl fmt::Display for DueFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.miles, self.date) {
            (true, true) => f.write_str("miles/date"),
            (true, false) => f.write_str("miles"),
            (false, true) => f.write_str("date"),
            (false, false) => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DueQuery<'q> {
    pub vehicle: Option<&'q str>,
    pub miles_now: Option<u64>,
    pub today: NaiveDate,
}

#[derive(Debug)]
pub struct DueItem<'a> {
    pub record: &'a MaintenanceRecord,
    pub flags: DueFlags,
}

pub fn due_flags(record: &MaintenanceRecord, miles_now: Option<u64>, today: NaiveDate) -> DueFlags {
    let miles = match (miles_now, record.next_due_miles) {
        (Some(now), Some(threshold)) => threshold <= now,
        _ => false,
    };

    let date = match record.next_due_date {
        Some(threshold) => threshold <= today,
        None => false,
    };

    DueFlags { miles, date }
}

/// Records with at least one due flag, sorted by vehicle then date.
pub fn due<'a>(records: &'a [MaintenanceRecord], query: &DueQuery<'_>) -> Vec<DueItem<'a>> {
    let mut items: Vec<_> = records
        .iter()
        .filter(|r| matches_vehicle(r, query.vehicle))
        .map(|record| DueItem {
            record,
            flags: due_flags(record, query.miles_now, query.today),
        })
        .filter(|item| item.flags.any())
        .collect();

    items.sort_by(|a, b| by_vehicle_then_date(a.record, b.record));
    items
}

pub fn render(items: &[DueItem<'_>]) -> String {
    if items.is_empty() {
        return String::from("Nothing due. Nice!\n");
    }

    let mut output = String::new();
    for item in items {
        let r = item.record;
        output.push_str(&format!(
            "DUE[{}] {} | {} | last {} @ {} mi | next {} / {}\n",
            item.flags,
            r.vehicle,
            r.job,
            dates::format_iso(r.date),
            r.odometer,
            opt_display(&r.next_due_miles),
            r.next_due_date.map(dates::format_iso).unwrap_or_default(),
        ));
    }
    output
}
