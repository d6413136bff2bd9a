//! `restore_runs`: one row per `restore` invocation.

use crate::errors::AppResult;
use chrono::Local;
use rusqlite::{Connection, params};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunCounters {
    pub statements: usize,
    pub tables: usize,
    pub rows_parsed: usize,
    pub rows_written: usize,
    pub parse_failures: usize,
    pub chunk_failures: usize,
}

#[derive(Debug, Clone)]
pub struct RunRecord {
    pub id: i64,
    pub started_at: String,
    pub finished_at: Option<String>,
    pub dump_file: String,
    pub target: String,
    pub counters: RunCounters,
}

pub fn start_run(conn: &Connection, dump_file: &str, target: &str) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO restore_runs (started_at, dump_file, target) VALUES (?1, ?2, ?3)",
        params![Local::now().to_rfc3339(), dump_file, target],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn finish_run(conn: &Connection, id: i64, c: &RunCounters) -> AppResult<()> {
    conn.execute(
        "UPDATE restore_runs
            SET finished_at = ?1, statements = ?2, tables = ?3, rows_parsed = ?4,
                rows_written = ?5, parse_failures = ?6, chunk_failures = ?7
          WHERE id = ?8",
        params![
            Local::now().to_rfc3339(),
            c.statements as i64,
            c.tables as i64,
            c.rows_parsed as i64,
            c.rows_written as i64,
            c.parse_failures as i64,
            c.chunk_failures as i64,
            id
        ],
    )?;
    Ok(())
}

pub fn load_runs(conn: &Connection) -> AppResult<Vec<RunRecord>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, started_at, finished_at, dump_file, target, statements, tables,
                rows_parsed, rows_written, parse_failures, chunk_failures
           FROM restore_runs ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(RunRecord {
            id: row.get(0)?,
            started_at: row.get(1)?,
            finished_at: row.get(2)?,
            dump_file: row.get(3)?,
            target: row.get(4)?,
            counters: RunCounters {
                statements: row.get::<_, i64>(5)? as usize,
                tables: row.get::<_, i64>(6)? as usize,
                rows_parsed: row.get::<_, i64>(7)? as usize,
                rows_written: row.get::<_, i64>(8)? as usize,
                parse_failures: row.get::<_, i64>(9)? as usize,
                chunk_failures: row.get::<_, i64>(10)? as usize,
            },
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
