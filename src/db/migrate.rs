use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension};

type Migration = (&'static str, &'static str, &'static str);

/// Journal migrations, applied in order. Each one is recorded in `log`
/// as `migration_applied` with its version as target.
const MIGRATIONS: &[Migration] = &[
    (
        "20250611_0001_create_restore_runs",
        "Created restore_runs table",
        r#"
        CREATE TABLE IF NOT EXISTS restore_runs (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            started_at     TEXT NOT NULL,
            finished_at    TEXT,
            dump_file      TEXT NOT NULL,
            target         TEXT NOT NULL,
            statements     INTEGER NOT NULL DEFAULT 0,
            rows_parsed    INTEGER NOT NULL DEFAULT 0,
            rows_written   INTEGER NOT NULL DEFAULT 0,
            parse_failures INTEGER NOT NULL DEFAULT 0,
            chunk_failures INTEGER NOT NULL DEFAULT 0
        );
        CREATE INDEX IF NOT EXISTS idx_restore_runs_started ON restore_runs(started_at);
        "#,
    ),
    (
        "20250703_0002_add_tables_to_runs",
        "Added tables column to restore_runs",
        "ALTER TABLE restore_runs ADD COLUMN tables INTEGER NOT NULL DEFAULT 0;",
    ),
];

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> AppResult<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

/// Run all pending journal migrations.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    ensure_log_table(conn)?;

    for (version, message, sql) in MIGRATIONS {
        if is_applied(conn, version)? {
            continue;
        }

        conn.execute_batch(sql)
            .map_err(|e| AppError::Migration(format!("{}: {}", version, e)))?;

        conn.execute(
            "INSERT INTO log (date, operation, target, message)
             VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
            [version, message],
        )?;

        success(format!("Journal migration applied: {}", version));
    }

    Ok(())
}
