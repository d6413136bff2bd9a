use super::{ParseError, parse_values, preview};
use crate::models::{Row, SqlValue};
use regex::Regex;
use std::sync::LazyLock;

static INSERT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?is)^INSERT\s+INTO\s+(?:"?([A-Za-z_][\w$]*)"?\s*\.\s*)?"?([A-Za-z_][\w$]*)"?\s*\(([^)]*)\)\s*VALUES\s*\((.*)\)\s*;?\s*$"#,
    )
    .expect("INSERT pattern is a valid regex")
});

/// A matched `INSERT INTO` statement.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertStatement {
    pub schema: Option<String>,
    pub table: String,
    pub columns: Vec<String>,
    /// One entry per VALUES tuple; each has exactly `columns.len()` values.
    pub rows: Vec<Vec<SqlValue>>,
}

impl InsertStatement {
    /// Zip columns and values into ordered rows.
    pub fn into_rows(self) -> Vec<Row> {
        let columns = self.columns;
        self.rows
            .into_iter()
            .map(|values| columns.iter().cloned().zip(values).collect())
            .collect()
    }
}

/// True when the statement starts with `INSERT INTO` (case-insensitive).
pub fn is_insert(stmt: &str) -> bool {
    let s = stmt.trim_start();
    s.len() >= 11 && s.is_char_boundary(11) && s[..11].eq_ignore_ascii_case("INSERT INTO")
}

/// Parse one statement.
///
/// Returns `Ok(None)` for statements that are not inserts, an error for
/// inserts that cannot be turned into rows as a whole.
pub fn parse_insert(stmt: &str) -> Result<Option<InsertStatement>, ParseError> {
    if !is_insert(stmt) {
        return Ok(None);
    }

    let caps = INSERT_RE
        .captures(stmt.trim())
        .ok_or_else(|| ParseError::Shape(preview(stmt)))?;

    let schema = caps.get(1).map(|m| m.as_str().to_string());
    let table = caps[2].to_string();
    let columns: Vec<String> = caps[3]
        .split(',')
        .map(|c| c.trim().trim_matches('"').to_string())
        .filter(|c| !c.is_empty())
        .collect();
    if columns.is_empty() {
        return Err(ParseError::Shape(preview(stmt)));
    }

    let mut rows = Vec::new();
    for tuple in split_tuples(&caps[4]) {
        let values = parse_values(tuple);
        if values.len() != columns.len() {
            return Err(ParseError::ColumnMismatch {
                table,
                columns: columns.len(),
                values: values.len(),
            });
        }
        rows.push(values);
    }

    Ok(Some(InsertStatement {
        schema,
        table,
        columns,
        rows,
    }))
}

/// Split `a), (b), (c` into its tuples. Anything that does not look like a
/// tuple list is returned whole.
fn split_tuples(inner: &str) -> Vec<&str> {
    let bytes = inner.as_bytes();
    let mut tuples = Vec::new();
    let mut in_string = false;
    let mut depth = 0usize;
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\'' => in_string = !in_string,
            b'(' if !in_string => depth += 1,
            b')' if !in_string && depth > 0 => depth -= 1,
            b')' if !in_string => {
                tuples.push(&inner[start..i]);

                let mut j = i + 1;
                while j < bytes.len() && bytes[j].is_ascii_whitespace() {
                    j += 1;
                }
                if j >= bytes.len() || bytes[j] != b',' {
                    return vec![inner];
                }
                j += 1;
                while j < bytes.len() && bytes[j].is_ascii_whitespace() {
                    j += 1;
                }
                if j >= bytes.len() || bytes[j] != b'(' {
                    return vec![inner];
                }
                start = j + 1;
                i = start;
                continue;
            }
            _ => {}
        }
        i += 1;
    }

    tuples.push(&inner[start..]);
    tuples
}
