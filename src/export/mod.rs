// src/export/mod.rs

mod csv;
mod fs_utils;
mod json;

use crate::errors::AppResult;
use crate::models::TableBatches;
use crate::ui::messages::success;
use clap::ValueEnum;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// One JSON file, tables in dump order
    Json,
    /// One CSV file per table inside the output directory
    Csv,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}

pub struct ExportLogic;

impl ExportLogic {
    /// Write parsed batches to `out` and return the files created.
    pub fn export(
        batches: &TableBatches,
        format: ExportFormat,
        out: &Path,
        force: bool,
    ) -> AppResult<Vec<PathBuf>> {
        let files = match format {
            ExportFormat::Json => json::write_json(out, batches, force)?,
            ExportFormat::Csv => csv::write_csv_dir(out, batches, force)?,
        };

        for f in &files {
            success(format!(
                "{} export completed: {}",
                format.as_str().to_uppercase(),
                f.display()
            ));
        }
        Ok(files)
    }
}
