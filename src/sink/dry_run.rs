use super::UpsertSink;
use crate::errors::AppResult;
use crate::models::Row;
use crate::ui::messages::step;
use indexmap::IndexMap;

/// Counts what would be sent without touching any store.
#[derive(Debug, Default)]
pub struct DryRunSink {
    pub calls: IndexMap<String, Vec<usize>>,
}

impl DryRunSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UpsertSink for DryRunSink {
    fn label(&self) -> String {
        "dry-run".to_string()
    }

    fn upsert(&mut self, table: &str, rows: &[Row]) -> AppResult<usize> {
        step(format!("would upsert {} row(s) into {}", rows.len(), table));
        self.calls
            .entry(table.to_string())
            .or_default()
            .push(rows.len());
        Ok(rows.len())
    }
}
