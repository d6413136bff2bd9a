//! Hand-written parser for the `INSERT INTO` statements of a SQL dump.
//!
//! The dump is first cut into statements ([`split_sql_statements`]), each
//! insert is matched against its expected shape ([`parse_insert`]) and the
//! VALUES section is tokenized into typed values ([`parse_values`]).

mod splitter;
mod statement;
mod values;

pub use splitter::{SplitOptions, split_sql_statements, split_sql_statements_with};
pub use statement::{InsertStatement, is_insert, parse_insert};
pub use values::{Token, parse_values, tokenize_values};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("statement does not match INSERT INTO <table> (<columns>) VALUES (<values>): {0}")]
    Shape(String),

    #[error("table '{table}': {columns} column(s) but {values} value(s)")]
    ColumnMismatch {
        table: String,
        columns: usize,
        values: usize,
    },
}

/// Shorten a statement for diagnostics.
pub(crate) fn preview(stmt: &str) -> String {
    let flat: String = stmt.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() > 80 {
        let mut s: String = flat.chars().take(77).collect();
        s.push_str("...");
        s
    } else {
        flat
    }
}
