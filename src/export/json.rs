use crate::errors::AppResult;
use crate::export::fs_utils::{ensure_parent, ensure_writable};
use crate::models::TableBatches;
use std::fs;
use std::path::{Path, PathBuf};

/// Write all batches as one pretty JSON object `{ table: [rows] }`.
pub fn write_json(path: &Path, batches: &TableBatches, force: bool) -> AppResult<Vec<PathBuf>> {
    ensure_parent(path)?;
    ensure_writable(path, force)?;

    let json = serde_json::to_string_pretty(batches)?;
    fs::write(path, json)?;
    Ok(vec![path.to_path_buf()])
}
