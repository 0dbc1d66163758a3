pub mod cli;
pub mod commands;
pub mod config;
pub mod dates;
pub mod error;
pub mod ledger;
pub mod record;
pub mod report;
pub mod store;

pub use error::{LedgerError, Result};
pub use record::{MaintenanceRecord, Money, Who};
pub use store::Store;
