use crate::errors::AppResult;
use crate::export::fs_utils::ensure_writable;
use crate::models::TableBatches;
use csv::Writer;
use std::fs;
use std::path::{Path, PathBuf};

/// Write one `<table>.csv` per table into `dir`.
/// The header is the union of the table's columns; NULL becomes an empty field.
pub fn write_csv_dir(dir: &Path, batches: &TableBatches, force: bool) -> AppResult<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;
    let mut written = Vec::new();

    for (table, rows) in batches.iter() {
        let path = dir.join(format!("{table}.csv"));
        ensure_writable(&path, force)?;

        let columns = batches.columns(table);
        let mut wtr = Writer::from_path(&path)?;
        wtr.write_record(&columns)?;

        for row in rows {
            let record: Vec<String> = columns
                .iter()
                .map(|c| row.get(c).map(|v| v.to_field()).unwrap_or_default())
                .collect();
            wtr.write_record(&record)?;
        }

        wtr.flush()?;
        written.push(path);
    }

    Ok(written)
}
