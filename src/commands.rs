//! Dispatch from a parsed subcommand to the ledger and reports.
//!
//! Returns the text to print so the binary only decides where it goes.
//! `list` and `due` skip malformed rows; `summary` refuses to total a
//! ledger it cannot fully read.

use chrono::NaiveDate;

use crate::cli::{AddArgs, Command, DueArgs, ListArgs};
use crate::dates;
use crate::error::{LedgerError, Result};
use crate::ledger;
use crate::report::{due, list, summary};
use crate::store::Store;

pub fn run(command: &Command, store: &Store, today: NaiveDate) -> Result<String> {
    match command {
        Command::Add(args) => add(args, store, today),
        Command::List(args) => list_entries(args, store),
        Command::Due(args) => due_entries(args, store, today),
        Command::Summary => {
            let records = store.read_all()?;
            Ok(summary::render(&summary::summarize(&records)))
        }
    }
}

fn add(args: &AddArgs, store: &Store, today: NaiveDate) -> Result<String> {
    let record = ledger::add(store, &args.to_entry(), today)?;
    Ok(format!("{}\n", ledger::render_added(&record)))
}

fn list_entries(args: &ListArgs, store: &Store) -> Result<String> {
    let records = store.read_lenient()?.records;
    let rows = list::list(&records, args.vehicle.as_deref());
    Ok(list::render(&rows))
}

fn due_entries(args: &DueArgs, store: &Store, today: NaiveDate) -> Result<String> {
    // validate before touching the store
    let today = match &args.date_today {
        Some(raw) => dates::parse_iso(raw).ok_or_else(|| {
            LedgerError::validation(format!("invalid --date-today '{raw}': expected YYYY-MM-DD"))
        })?,
        None => today,
    };

    let records = store.read_lenient()?.records;
    let query = due::DueQuery {
        vehicle: args.vehicle.as_deref(),
        miles_now: args.miles_now,
        today,
    };
    Ok(due::render(&due::due(&records, &query)))
}
