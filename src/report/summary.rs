//! Cost totals per vehicle, per job, and overall.
//!
//! Records with no cost (or a cost that could not be read) count as zero.
//! Jobs are ordered by total descending; equal totals keep the order in
//! which each job was first seen.

use std::collections::{BTreeMap, HashMap};

use crate::record::{MaintenanceRecord, Money};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CostSummary {
    /// Sorted by vehicle name ascending.
    pub by_vehicle: Vec<(String, Money)>,
    /// Sorted by total descending.
    pub by_job: Vec<(String, Money)>,
    pub total: Money,
}

pub fn summarize(records: &[MaintenanceRecord]) -> CostSummary {
    let mut by_vehicle: BTreeMap<&str, Money> = BTreeMap::new();
    let mut by_job: Vec<(String, Money)> = Vec::new();
    let mut job_index: HashMap<&str, usize> = HashMap::new();
    let mut total = Money::ZERO;

    for record in records {
        let cost = record.cost_or_zero();
        total += cost;

        *by_vehicle.entry(record.vehicle.as_str()).or_default() += cost;

        let idx = *job_index.entry(record.job.as_str()).or_insert_with(|| {
            by_job.push((record.job.clone(), Money::ZERO));
            by_job.len() - 1
        });
        by_job[idx].1 += cost;
    }

    // stable, so ties stay in first-seen order
    by_job.sort_by(|a, b| b.1.cmp(&a.1));

    CostSummary {
        by_vehicle: by_vehicle
            .into_iter()
            .map(|(vehicle, cost)| (vehicle.to_string(), cost))
            .collect(),
        by_job,
        total,
    }
}

pub fn render(summary: &CostSummary) -> String {
    let mut output = String::from("=== Cost by vehicle ===\n");
    for (vehicle, cost) in &summary.by_vehicle {
        output.push_str(&format!("{vehicle}: ${cost}\n"));
    }

    output.push_str("\n=== Cost by job ===\n");
    for (job, cost) in &summary.by_job {
        output.push_str(&format!("{job}: ${cost}\n"));
    }

    output.push_str(&format!("\nTotal: ${}\n", summary.total));
    output
}
