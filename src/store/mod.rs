//! Flat CSV ledger storage.
//!
//! The ledger is a single append-only CSV file:
//! - fixed header row, written when the file is first created
//! - one row per service record, in insertion order
//! - no updates or deletes
//!
//! Every read is a full read; callers sort as they need.

pub mod row;

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{LedgerError, Result};
use crate::record::MaintenanceRecord;
use row::{StoredRow, COLUMNS};

/// Handle to the ledger file. Cheap to create; touches disk only on use.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Store { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the containing directory and the file with its header row if
    /// either is missing. A zero-length file is treated as missing.
    pub fn ensure_initialized(&self) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| LedgerError::io(dir, e))?;
        }

        match fs::metadata(&self.path) {
            Ok(meta) if meta.len() > 0 => return Ok(()),
            Ok(_) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(LedgerError::io(&self.path, e)),
        }

        log::info!("creating ledger at {}", self.path.display());

        let file = File::create(&self.path).map_err(|e| LedgerError::io(&self.path, e))?;
        let mut writer = csv::Writer::from_writer(file);
        writer.write_record(COLUMNS)?;
        writer.flush().map_err(|e| LedgerError::io(&self.path, e))?;

        Ok(())
    }

    /// Append one record as a single row.
    pub fn append(&self, record: &MaintenanceRecord) -> Result<()> {
        self.ensure_initialized()?;

        // encode the whole row first so it reaches the file in one write
        let mut encoder = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());
        encoder.serialize(StoredRow::from(record))?;
        let bytes = encoder
            .into_inner()
            .map_err(|e| LedgerError::io(&self.path, e.into_error()))?;

        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|e| LedgerError::io(&self.path, e))?;
        file.write_all(&bytes)
            .map_err(|e| LedgerError::io(&self.path, e))?;

        log::debug!(
            "appended {} {} to {}",
            record.vehicle,
            record.job,
            self.path.display()
        );

        Ok(())
    }

    /// Read every record in on-disk order. Any malformed row fails the read.
    pub fn read_all(&self) -> Result<Vec<MaintenanceRecord>> {
        self.scan(|_, err| Err(err))
    }

    /// Read every well-formed record in on-disk order, skipping malformed
    /// rows. Failures to open or read the file are still errors.
    pub fn read_lenient(&self) -> Result<LenientRead> {
        let mut skipped = Vec::new();
        let records = self.scan(|line, err| {
            log::warn!("skipping line {line} of {}: {err}", self.path.display());
            skipped.push(line);
            Ok(())
        })?;

        Ok(LenientRead { records, skipped })
    }

    fn scan(&self, mut on_malformed: impl FnMut(u64, LedgerError) -> Result<()>) -> Result<Vec<MaintenanceRecord>> {
        self.ensure_initialized()?;

        let file = File::open(&self.path).map_err(|e| LedgerError::io(&self.path, e))?;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(file);
        let headers = reader.headers()?.clone();

        let mut records = Vec::new();
        for result in reader.records() {
            let raw = match result {
                Ok(raw) => raw,
                Err(e) if e.is_io_error() => return Err(e.into()),
                Err(e) => {
                    let line = e.position().map(|p| p.line()).unwrap_or(0);
                    on_malformed(line, e.into())?;
                    continue;
                }
            };

            let line = raw.position().map(|p| p.line()).unwrap_or(0);
            let parsed = raw
                .deserialize::<StoredRow>(Some(&headers))
                .map_err(LedgerError::from)
                .and_then(|row| row.into_record(line));

            match parsed {
                Ok(record) => records.push(record),
                Err(e) => on_malformed(line, e)?,
            }
        }

        log::debug!("read {} records from {}", records.len(), self.path.display());

        Ok(records)
    }
}

/// Result of a read that skips malformed rows.
#[derive(Debug, Default)]
pub struct LenientRead {
    pub records: Vec<MaintenanceRecord>,
    /// Line numbers of the rows that were skipped.
    pub skipped: Vec<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Money, Who};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn record(vehicle: &str, job: &str) -> MaintenanceRecord {
        MaintenanceRecord {
            date: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            vehicle: vehicle.to_string(),
            odometer: 50_000,
            job: job.to_string(),
            parts: Some("5W-30, filter".to_string()),
            cost: Some(Money::from_cents(4250)),
            who: Who::Shop,
            torque_notes: None,
            interval_miles: Some(5000),
            interval_months: Some(1),
            next_due_miles: Some(55_000),
            next_due_date: NaiveDate::from_ymd_opt(2024, 2, 29),
        }
    }

    #[test]
    fn creates_directory_and_header() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path().join("data").join("maintenance.csv"));

        store.ensure_initialized().unwrap();

        let contents = fs::read_to_string(store.path()).unwrap();
        assert_eq!(contents.trim_end(), COLUMNS.join(","));
    }

    #[test]
    fn initialization_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path().join("maintenance.csv"));

        store.append(&record("Civic", "Oil change")).unwrap();
        store.ensure_initialized().unwrap();

        assert_eq!(store.read_all().unwrap().len(), 1);
    }

    #[test]
    fn empty_file_gets_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("maintenance.csv");
        File::create(&path).unwrap();

        let store = Store::new(&path);
        assert!(store.read_all().unwrap().is_empty());
        assert!(fs::read_to_string(&path).unwrap().starts_with("date,vehicle,"));
    }

    #[test]
    fn reads_back_in_insertion_order() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path().join("maintenance.csv"));

        store.append(&record("Tacoma", "Brakes")).unwrap();
        store.append(&record("Civic", "Oil change")).unwrap();

        let records = store.read_all().unwrap();
        assert_eq!(records, vec![record("Tacoma", "Brakes"), record("Civic", "Oil change")]);
    }

    #[test]
    fn quotes_free_text_with_commas() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path().join("maintenance.csv"));

        store.append(&record("Civic", "Oil, filter \"premium\"")).unwrap();

        let records = store.read_all().unwrap();
        assert_eq!(records[0].job, "Oil, filter \"premium\"");
        assert_eq!(records[0].parts.as_deref(), Some("5W-30, filter"));
    }

    #[test]
    fn malformed_required_column_fails_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("maintenance.csv");
        fs::write(
            &path,
            format!("{}\n2024-01-01,Civic,many,Oil change,,,Self,,,,,\n", COLUMNS.join(",")),
        )
        .unwrap();

        let err = Store::new(&path).read_all().unwrap_err();
        assert!(matches!(err, LedgerError::Parse { line: 2, .. }));
    }

    #[test]
    fn lenient_read_skips_malformed_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("maintenance.csv");
        fs::write(
            &path,
            format!(
                "{}\n\
                 2024-01-01,Civic,50000,Oil change,,,Self,,,,,\n\
                 2024-01-02,Civic,\"51,000\",Brakes,,,Self,,,,,\n\
                 2024-01-03,Civic,52000\n\
                 someday,Tacoma,1,Wash,,,Self,,,,,\n\
                 2024-01-04,Tacoma,60000,Tires,,,Shop,,,,,\n",
                COLUMNS.join(",")
            ),
        )
        .unwrap();

        let read = Store::new(&path).read_lenient().unwrap();
        let jobs: Vec<_> = read.records.iter().map(|r| r.job.as_str()).collect();
        assert_eq!(jobs, ["Oil change", "Tires"]);
        assert_eq!(read.skipped, vec![3, 4, 5]);
    }

    #[test]
    fn unwritable_location_is_io_error() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "").unwrap();

        let store = Store::new(blocker.join("maintenance.csv"));
        let err = store.append(&record("Civic", "Oil change")).unwrap_err();
        assert!(matches!(err, LedgerError::Io { .. }));
    }
}
