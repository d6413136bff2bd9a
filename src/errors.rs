//! Unified application error type.
//! All modules (sql, core, sink, db, cli) return AppError to keep the error
//! handling consistent and easy to manage.

use crate::sql::ParseError;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    // ---------------------------
    // Journal database
    // ---------------------------
    #[error("Journal error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Journal migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Replay errors
    // ---------------------------
    #[error("Upsert into '{table}' failed: {message}")]
    Upsert { table: String, message: String },

    #[error("Cannot order tables: {0}")]
    TableOrder(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigFormat(#[from] serde_yaml::Error),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    pub fn upsert(table: &str, message: impl Into<String>) -> Self {
        AppError::Upsert {
            table: table.to_string(),
            message: message.into(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
