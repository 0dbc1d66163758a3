use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::ledger::NewEntry;

#[derive(Parser)]
#[command(name = "shoplog")]
#[command(about = "ShopLog: simple vehicle maintenance ledger")]
#[command(version)]
pub struct Cli {
    /// Ledger CSV file (overrides SHOPLOG_DATA and the config file)
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// Show debug logging on stderr
    #[arg(long, short = 'v', global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Add a maintenance entry
    Add(AddArgs),

    /// List entries
    List(ListArgs),

    /// Show due items by mileage/date
    Due(DueArgs),

    /// Cost summary by vehicle and job
    Summary,
}

#[derive(Parser)]
pub struct AddArgs {
    /// Vehicle name, e.g. Civic
    #[arg(long)]
    pub vehicle: String,

    /// Odometer reading in miles
    #[arg(long, allow_hyphen_values = true)]
    pub odometer: String,

    /// What was done
    #[arg(long)]
    pub job: String,

    /// Service date as YYYY-MM-DD (default today)
    #[arg(long)]
    pub date: Option<String>,

    /// Parts used
    #[arg(long)]
    pub parts: Option<String>,

    /// Total cost
    #[arg(long, allow_hyphen_values = true)]
    pub cost: Option<String>,

    /// Who did the work: Self or Shop (default Self)
    #[arg(long)]
    pub who: Option<String>,

    /// Torque specs or other notes
    #[arg(long)]
    pub torque: Option<String>,

    /// Repeat after this many miles
    #[arg(long)]
    pub interval_miles: Option<u64>,

    /// Repeat after this many months
    #[arg(long)]
    pub interval_months: Option<u32>,
}

impl AddArgs {
    pub fn to_entry(&self) -> NewEntry {
        NewEntry {
            vehicle: self.vehicle.clone(),
            odometer: self.odometer.clone(),
            job: self.job.clone(),
            date: self.date.clone(),
            parts: self.parts.clone(),
            cost: self.cost.clone(),
            who: self.who.clone(),
            torque_notes: self.torque.clone(),
            interval_miles: self.interval_miles,
            interval_months: self.interval_months,
        }
    }
}

#[derive(Parser)]
pub struct ListArgs {
    /// Only show this vehicle
    #[arg(long)]
    pub vehicle: Option<String>,
}

#[derive(Parser)]
pub struct DueArgs {
    /// Only show this vehicle
    #[arg(long)]
    pub vehicle: Option<String>,

    /// Current odometer reading; enables mileage checks
    #[arg(long)]
    pub miles_now: Option<u64>,

    /// Treat this YYYY-MM-DD as today
    #[arg(long)]
    pub date_today: Option<String>,
}
