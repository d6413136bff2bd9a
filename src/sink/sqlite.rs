use super::UpsertSink;
use crate::errors::AppResult;
use crate::models::{Row, SqlValue};
use indexmap::IndexMap;
use rusqlite::types::{ToSqlOutput, Value, ValueRef};
use rusqlite::{Connection, ToSql, params_from_iter};
use std::path::Path;

impl ToSql for SqlValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            SqlValue::Null => ToSqlOutput::Owned(Value::Null),
            SqlValue::Bool(b) => ToSqlOutput::Owned(Value::Integer(i64::from(*b))),
            SqlValue::Number(n) => match (n.as_i64(), n.as_f64()) {
                (Some(i), _) => ToSqlOutput::Owned(Value::Integer(i)),
                (None, Some(f)) => ToSqlOutput::Owned(Value::Real(f)),
                (None, None) => ToSqlOutput::Owned(Value::Text(n.to_string())),
            },
            SqlValue::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
        })
    }
}

/// Replays rows into a local SQLite file. Tables and columns that do not
/// exist yet are created from what the dump contains.
pub struct SqliteSink {
    conn: Connection,
    path: String,
    conflict_keys: IndexMap<String, Vec<String>>,
}

pub(crate) fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

impl SqliteSink {
    pub fn open(path: &str, conflict_keys: IndexMap<String, Vec<String>>) -> AppResult<Self> {
        let conn = Connection::open(Path::new(path))?;
        Ok(Self {
            conn,
            path: path.to_string(),
            conflict_keys,
        })
    }

    /// Conflict columns for a table: configured key, else `id` when the rows have one.
    fn key_for(&self, table: &str, columns: &[String]) -> Vec<String> {
        if let Some(key) = self.conflict_keys.get(table)
            && !key.is_empty()
        {
            return key.clone();
        }
        if columns.iter().any(|c| c == "id") {
            return vec!["id".to_string()];
        }
        Vec::new()
    }

    fn existing_columns(&self, table: &str) -> AppResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare(&format!("PRAGMA table_info({})", quote_ident(table)))?;
        let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

        let mut out = Vec::new();
        for c in cols {
            out.push(c?);
        }
        Ok(out)
    }

    /// Create the table, or add the columns it is missing.
    fn ensure_table(&self, table: &str, columns: &[String], key: &[String]) -> AppResult<()> {
        let existing = self.existing_columns(table)?;

        if existing.is_empty() {
            let mut defs: Vec<String> = columns.iter().map(|c| quote_ident(c)).collect();
            if !key.is_empty() && key.iter().all(|k| columns.contains(k)) {
                let pk: Vec<String> = key.iter().map(|k| quote_ident(k)).collect();
                defs.push(format!("PRIMARY KEY ({})", pk.join(", ")));
            }
            self.conn.execute_batch(&format!(
                "CREATE TABLE IF NOT EXISTS {} ({});",
                quote_ident(table),
                defs.join(", ")
            ))?;
            return Ok(());
        }

        for col in columns.iter().filter(|c| !existing.contains(*c)) {
            self.conn.execute_batch(&format!(
                "ALTER TABLE {} ADD COLUMN {};",
                quote_ident(table),
                quote_ident(col)
            ))?;
        }
        Ok(())
    }
}

fn insert_sql(table: &str, columns: &[&String], key: &[String]) -> String {
    let cols: Vec<String> = columns.iter().map(|c| quote_ident(c)).collect();
    let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{i}")).collect();

    let keyed = !key.is_empty() && key.iter().all(|k| columns.contains(&k));
    if !keyed {
        return format!(
            "INSERT OR REPLACE INTO {} ({}) VALUES ({})",
            quote_ident(table),
            cols.join(", "),
            placeholders.join(", ")
        );
    }

    let updates: Vec<String> = columns
        .iter()
        .filter(|c| !key.contains(*c))
        .map(|c| format!("{0} = excluded.{0}", quote_ident(c)))
        .collect();
    let conflict: Vec<String> = key.iter().map(|k| quote_ident(k)).collect();
    let action = if updates.is_empty() {
        "DO NOTHING".to_string()
    } else {
        format!("DO UPDATE SET {}", updates.join(", "))
    };

    format!(
        "INSERT INTO {} ({}) VALUES ({}) ON CONFLICT ({}) {}",
        quote_ident(table),
        cols.join(", "),
        placeholders.join(", "),
        conflict.join(", "),
        action
    )
}

impl UpsertSink for SqliteSink {
    fn label(&self) -> String {
        format!("sqlite ({})", self.path)
    }

    fn upsert(&mut self, table: &str, rows: &[Row]) -> AppResult<usize> {
        let mut columns: Vec<String> = Vec::new();
        for key in rows.iter().flat_map(|r| r.keys()) {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
        if columns.is_empty() {
            return Ok(0);
        }

        let key = self.key_for(table, &columns);
        self.ensure_table(table, &columns, &key)?;

        // one transaction per chunk
        let tx = self.conn.transaction()?;
        for row in rows {
            let row_cols: Vec<&String> = row.keys().collect();
            let mut stmt = tx.prepare_cached(&insert_sql(table, &row_cols, &key))?;
            stmt.execute(params_from_iter(row.values()))?;
        }
        tx.commit()?;

        Ok(rows.len())
    }
}
