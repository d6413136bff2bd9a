use crate::models::sql_value::SqlValue;
use indexmap::IndexMap;
use serde::Serialize;

/// One row: column name → value, in the column order of its INSERT statement.
pub type Row = IndexMap<String, SqlValue>;

/// Rows grouped per table, tables kept in first-seen order.
#[derive(Debug, Default, Clone, Serialize)]
#[serde(transparent)]
pub struct TableBatches {
    tables: IndexMap<String, Vec<Row>>,
}

impl TableBatches {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, table: &str, row: Row) {
        self.tables.entry(table.to_string()).or_default().push(row);
    }

    pub fn rows(&self, table: &str) -> &[Row] {
        self.tables.get(table).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Table names in first-seen order.
    pub fn table_names(&self) -> Vec<String> {
        self.tables.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<Row>)> {
        self.tables.iter()
    }

    /// Union of the columns used by a table's rows, in first-seen order.
    pub fn columns(&self, table: &str) -> Vec<String> {
        let mut cols: Vec<String> = Vec::new();
        for row in self.rows(table) {
            for key in row.keys() {
                if !cols.contains(key) {
                    cols.push(key.clone());
                }
            }
        }
        cols
    }

    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    pub fn row_count(&self) -> usize {
        self.tables.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Keep only the named tables (used by `restore --table`).
    pub fn retain_tables(&mut self, keep: &[String]) {
        self.tables.retain(|name, _| keep.iter().any(|k| k == name));
    }
}
