//! Read-only reports over the full ledger.
//!
//! Each report is a pure function over the records read from the store,
//! paired with a `render` that produces the text printed to stdout.

pub mod due;
pub mod list;
pub mod summary;

use std::cmp::Ordering;

use crate::record::MaintenanceRecord;

/// Ordering used by `list` and `due`: vehicle, then service date.
/// Callers use a stable sort so equal keys keep insertion order.
pub fn by_vehicle_then_date(a: &MaintenanceRecord, b: &MaintenanceRecord) -> Ordering {
    a.vehicle
        .cmp(&b.vehicle)
        .then_with(|| a.date.cmp(&b.date))
}

/// Exact vehicle match; `None` matches everything.
pub fn matches_vehicle(record: &MaintenanceRecord, vehicle: Option<&str>) -> bool {
    vehicle.map_or(true, |v| record.vehicle == v)
}
