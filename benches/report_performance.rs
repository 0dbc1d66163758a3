use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use chrono::NaiveDate;
use shoplog::ledger::{self, NewEntry};
use shoplog::report::{due, list, summary};
use shoplog::Store;
use tempfile::TempDir;

const VEHICLES: [&str; 4] = ["Civic", "Tacoma", "Miata", "Outback"];
const JOBS: [&str; 6] = ["Oil change", "Tire rotation", "Brakes", "Coolant", "Air filter", "Wipers"];

/// Build a ledger with `count` entries spread over a few vehicles and jobs.
fn populated_store(dir: &TempDir, count: usize) -> Store {
    let store = Store::new(dir.path().join("maintenance.csv"));
    let start = NaiveDate::from_ymd_opt(2015, 1, 1).unwrap();

    for i in 0..count {
        let entry = NewEntry {
            vehicle: VEHICLES[i % VEHICLES.len()].to_string(),
            odometer: (i * 250).to_string(),
            job: JOBS[i % JOBS.len()].to_string(),
            date: Some((start + chrono::Days::new(i as u64 % 3000)).format("%Y-%m-%d").to_string()),
            cost: Some(format!("{}.{:02}", 20 + i % 200, i % 100)),
            interval_miles: Some(5000),
            interval_months: Some(6),
            ..NewEntry::default()
        };
        ledger::add(&store, &entry, start).expect("failed to add fixture entry");
    }

    store
}

fn bench_reports(c: &mut Criterion) {
    let mut group = c.benchmark_group("reports");
    let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

    for count in [100, 1_000, 10_000] {
        let dir = TempDir::new().expect("failed to create temp dir");
        let store = populated_store(&dir, count);

        group.bench_with_input(BenchmarkId::new("read_all", count), &store, |b, store| {
            b.iter(|| black_box(store.read_all().unwrap()));
        });

        let records = store.read_all().unwrap();

        group.bench_with_input(BenchmarkId::new("list", count), &records, |b, records| {
            b.iter(|| black_box(list::render(&list::list(records, None))));
        });

        group.bench_with_input(BenchmarkId::new("due", count), &records, |b, records| {
            let query = due::DueQuery { vehicle: None, miles_now: Some(1_000_000), today };
            b.iter(|| black_box(due::render(&due::due(records, &query))));
        });

        group.bench_with_input(BenchmarkId::new("summary", count), &records, |b, records| {
            b.iter(|| black_box(summary::render(&summary::summarize(records))));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_reports);
criterion_main!(benches);
