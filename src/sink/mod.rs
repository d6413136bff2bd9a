//! Destinations for replayed rows.

mod dry_run;
mod rest;
mod sqlite;

pub use dry_run::DryRunSink;
pub use rest::RestSink;
pub use sqlite::SqliteSink;

use crate::errors::AppResult;
use crate::models::Row;
use clap::ValueEnum;

/// Something that can insert-or-update a batch of rows of one table.
pub trait UpsertSink {
    /// Short description shown in progress output and in the journal.
    fn label(&self) -> String;

    /// Upsert `rows` into `table`, returning the number of rows written.
    fn upsert(&mut self, table: &str, rows: &[Row]) -> AppResult<usize>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Target {
    /// Hosted backend REST API
    Rest,
    /// Local SQLite database file
    Sqlite,
    /// Parse and plan only, write nothing
    DryRun,
}
