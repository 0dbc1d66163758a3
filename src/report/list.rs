use crate::dates;
use crate::record::{opt_display, MaintenanceRecord};

use super::{by_vehicle_then_date, matches_vehicle};

/// Records for `vehicle` (or all), sorted by vehicle then date.
pub fn list<'a>(records: &'a [MaintenanceRecord], vehicle: Option<&str>) -> Vec<&'a MaintenanceRecord> {
    let mut rows: Vec<_> = records
        .iter()
        .filter(|r| matches_vehicle(r, vehicle))
        .collect();
    rows.sort_by(|a, b| by_vehicle_then_date(a, b));
    rows
}

pub fn render_line(record: &MaintenanceRecord) -> String {
    format!(
        "{} | {} | {} mi | {} | ${} | next due: {} mi / {}",
        dates::format_iso(record.date),
        record.vehicle,
        record.odometer,
        record.job,
        opt_display(&record.cost),
        opt_display(&record.next_due_miles),
        record.next_due_date.map(dates::format_iso).unwrap_or_default(),
    )
}

pub fn render(rows: &[&MaintenanceRecord]) -> String {
    let mut output = String::new();
    for record in rows {
        output.push_str(&render_line(record));
        output.push('\n');
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::fixtures::record;
    use chrono::NaiveDate;

    #[test]
    fn filters_to_one_vehicle_sorted_by_date() {
        let records = vec![
            record("Civic", "2024-05-01", "late", None),
            record("Tacoma", "2024-01-01", "other", None),
            record("Civic", "2023-02-01", "early", None),
        ];

        let rows = list(&records, Some("Civic"));
        let jobs: Vec<_> = rows.iter().map(|r| r.job.as_str()).collect();
        assert_eq!(jobs, ["early", "late"]);
    }

    #[test]
    fn unfiltered_lists_everything() {
        let records = vec![
            record("Tacoma", "2024-01-01", "a", None),
            record("Civic", "2024-01-01", "b", None),
        ];
        assert_eq!(list(&records, None).len(), 2);
        assert!(list(&records, Some("Miata")).is_empty());
    }

    #[test]
    fn equal_keys_keep_insertion_order() {
        let records = vec![
            record("Civic", "2024-01-01", "first", None),
            record("Civic", "2024-01-01", "second", None),
        ];
        let jobs: Vec<_> = list(&records, None).iter().map(|r| r.job.as_str()).collect();
        assert_eq!(jobs, ["first", "second"]);
    }

    #[test]
    fn line_format() {
        let mut r = record("Civic", "2024-03-01", "Oil change", Some(3999));
        r.odometer = 50_000;
        r.next_due_miles = Some(55_000);
        r.next_due_date = NaiveDate::from_ymd_opt(2024, 9, 1);
        assert_eq!(
            render_line(&r),
            "2024-03-01 | Civic | 50000 mi | Oil change | $39.99 | next due: 55000 mi / 2024-09-01"
        );

        let bare = record("Civic", "2024-03-01", "Wash", None);
        assert_eq!(
            render_line(&bare),
            "2024-03-01 | Civic | 10000 mi | Wash | $ | next due:  mi / "
        );
    }

    #[test]
    fn empty_renders_nothing() {
        assert_eq!(render(&[]), "");
    }
}
