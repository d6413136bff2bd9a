use crate::config::Config;
use crate::core::input::read_dump;
use crate::core::order::plan_table_order;
use crate::core::parse::{ParseLogic, ParseReport};
use crate::db::log::ttlog;
use crate::db::runs::{self, RunCounters};
use crate::errors::AppResult;
use crate::models::TableBatches;
use crate::sink::UpsertSink;
use crate::sql::SplitOptions;
use crate::ui::messages::{error, header, info, step, success, warning};
use crate::utils::table::{Align, Table};
use rusqlite::Connection;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableOutcome {
    pub table: String,
    pub rows: usize,
    pub chunks: usize,
    pub failed_chunks: usize,
    pub rows_written: usize,
}

#[derive(Debug, Clone, Default)]
pub struct RestoreReport {
    pub order: Vec<String>,
    pub tables: Vec<TableOutcome>,
}

impl RestoreReport {
    pub fn rows_written(&self) -> usize {
        self.tables.iter().map(|t| t.rows_written).sum()
    }

    pub fn failed_chunks(&self) -> usize {
        self.tables.iter().map(|t| t.failed_chunks).sum()
    }

    pub fn print_summary(&self) {
        let mut table = Table::new(&[
            ("TABLE", Align::Left),
            ("ROWS", Align::Right),
            ("CHUNKS", Align::Right),
            ("FAILED", Align::Right),
            ("WRITTEN", Align::Right),
        ]);
        for t in &self.tables {
            table.add_row(vec![
                t.table.clone(),
                t.rows.to_string(),
                t.chunks.to_string(),
                t.failed_chunks.to_string(),
                t.rows_written.to_string(),
            ]);
        }
        print!("{}", table.render());
    }
}

#[derive(Debug, Clone)]
pub struct RestoreOptions {
    pub chunk_size: usize,
    /// Restrict the replay to these tables (empty = all)
    pub tables: Vec<String>,
}

impl RestoreOptions {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            chunk_size: cfg.chunk_size,
            tables: Vec::new(),
        }
    }
}

pub struct RestoreLogic;

impl RestoreLogic {
    /// Send each table's rows, in `order`, through the sink in chunks.
    /// A failed chunk is reported and skipped; nothing is rolled back.
    pub fn replay(
        batches: &TableBatches,
        order: &[String],
        sink: &mut dyn UpsertSink,
        chunk_size: usize,
        journal: Option<&Connection>,
    ) -> RestoreReport {
        let chunk_size = chunk_size.max(1);
        let mut report = RestoreReport {
            order: order.to_vec(),
            tables: Vec::with_capacity(order.len()),
        };

        for table in order {
            let rows = batches.rows(table);
            let mut outcome = TableOutcome {
                table: table.clone(),
                rows: rows.len(),
                ..Default::default()
            };

            info(format!("Restoring {} ({} rows)", table, rows.len()));

            for (n, chunk) in rows.chunks(chunk_size).enumerate() {
                outcome.chunks += 1;
                match sink.upsert(table, chunk) {
                    Ok(written) => {
                        outcome.rows_written += written;
                        step(format!("{} chunk {}: {} row(s)", table, n + 1, written));
                    }
                    Err(e) => {
                        outcome.failed_chunks += 1;
                        error(format!("{} chunk {} failed: {}", table, n + 1, e));
                        if let Some(conn) = journal {
                            journal_note(
                                conn,
                                "chunk_failed",
                                table,
                                &format!("chunk {} ({} rows): {}", n + 1, chunk.len(), e),
                            );
                        }
                    }
                }
            }

            report.tables.push(outcome);
        }

        report
    }

    /// Read, parse, order and replay a dump file.
    pub fn restore_file(
        cfg: &Config,
        dump: &Path,
        sink: &mut dyn UpsertSink,
        opts: &RestoreOptions,
        journal: Option<&Connection>,
    ) -> AppResult<(ParseReport, RestoreReport)> {
        let text = read_dump(dump)?;
        let split = SplitOptions {
            strip_line_comments: cfg.strip_comments,
        };

        header(format!("Restoring {} → {}", dump.display(), sink.label()));

        let mut parsed = ParseLogic::parse_dump(&text, &split);
        info(format!(
            "{} statement(s), {} insert(s), {} row(s) in {} table(s)",
            parsed.statements,
            parsed.inserts,
            parsed.rows(),
            parsed.batches.table_count()
        ));

        if !opts.tables.is_empty() {
            for wanted in &opts.tables {
                if parsed.batches.rows(wanted).is_empty() {
                    warning(format!("Table '{}' has no rows in this dump", wanted));
                }
            }
            parsed.batches.retain_tables(&opts.tables);
        }

        let order = plan_table_order(
            &parsed.batches.table_names(),
            &cfg.table_order,
            &cfg.dependencies,
        )?;
        info(format!("Replay order: {}", order.join(" → ")));

        let run_id = journal.and_then(|conn| {
            runs::start_run(conn, &dump.to_string_lossy(), &sink.label())
                .map_err(|e| warning(format!("Failed to write journal: {}", e)))
                .ok()
        });

        let report = Self::replay(&parsed.batches, &order, sink, opts.chunk_size, journal);

        if let (Some(conn), Some(id)) = (journal, run_id) {
            let counters = RunCounters {
                statements: parsed.statements,
                tables: order.len(),
                rows_parsed: parsed.rows(),
                rows_written: report.rows_written(),
                parse_failures: parsed.failures.len(),
                chunk_failures: report.failed_chunks(),
            };
            if let Err(e) = runs::finish_run(conn, id, &counters) {
                warning(format!("Failed to write journal: {}", e));
            }
            journal_note(
                conn,
                "restore",
                &dump.to_string_lossy(),
                &format!(
                    "{} of {} row(s) written to {}",
                    counters.rows_written,
                    counters.rows_parsed,
                    sink.label()
                ),
            );
        }

        println!();
        report.print_summary();
        println!();

        if report.failed_chunks() == 0 && parsed.failures.is_empty() {
            success(format!("Restore completed: {} row(s)", report.rows_written()));
        } else {
            warning(format!(
                "Restore completed with problems: {} row(s) written, {} statement(s) skipped, {} chunk(s) failed",
                report.rows_written(),
                parsed.failures.len(),
                report.failed_chunks()
            ));
        }

        Ok((parsed, report))
    }
}

/// Journal writes never abort a restore.
fn journal_note(conn: &Connection, operation: &str, target: &str, message: &str) {
    if let Err(e) = ttlog(conn, operation, target, message) {
        warning(format!("Failed to write journal: {}", e));
    }
}
