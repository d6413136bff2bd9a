use crate::db::log::load_log;
use crate::db::pool::DbPool;
use crate::db::runs::load_runs;
use crate::errors::AppResult;
use crate::ui::messages::colors_enabled;
use crate::utils::colors::{CYAN, GREEN, RED, YELLOW, colorize_count, tint};
use ansi_term::Colour;

/// Colour per journal operation
fn color_for_operation(op: &str) -> Colour {
    match op {
        "restore" => Colour::Green,
        "chunk_failed" => Colour::Red,
        "init" => Colour::RGB(255, 153, 51),
        "migration_applied" => Colour::Purple,
        _ => Colour::White,
    }
}

/// Cut to `max` characters, appending "..." when shortened.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let mut out: String = s.chars().take(max.saturating_sub(3)).collect();
        out.push_str("...");
        out
    } else {
        s.to_string()
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(pool: &DbPool) -> AppResult<()> {
        let entries = load_log(&pool.conn)?;
        if entries.is_empty() {
            println!("📜 Journal is empty.");
            return Ok(());
        }

        let id_w = entries
            .iter()
            .map(|e| e.id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = entries.iter().map(|e| e.date.len()).max().unwrap_or(10);
        let op_w = entries
            .iter()
            .map(|e| e.operation.len())
            .max()
            .unwrap_or(10);

        println!("📜 Journal log:\n");

        for e in entries {
            let date = chrono::DateTime::parse_from_rfc3339(&e.date)
                .map(|dt| dt.format("%FT%T%:z").to_string())
                .unwrap_or(e.date);

            // pad before painting so ANSI codes do not skew the width
            let op = format!("{:<op_w$}", e.operation, op_w = op_w);
            let painted = if colors_enabled() {
                color_for_operation(&e.operation).paint(op).to_string()
            } else {
                op
            };

            let target = if e.target.is_empty() {
                String::new()
            } else {
                format!("({}) ", truncate(&e.target, 40))
            };

            println!(
                "{:>id_w$}: {:<date_w$} | {} {}=> {}",
                e.id,
                date,
                painted,
                target,
                e.message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }

    pub fn print_runs(pool: &DbPool) -> AppResult<()> {
        let runs = load_runs(&pool.conn)?;
        if runs.is_empty() {
            println!("📜 No restore runs recorded.");
            return Ok(());
        }

        println!("📜 Restore runs:\n");

        for r in runs {
            let status = match &r.finished_at {
                None => tint("unfinished", YELLOW),
                Some(_) if r.counters.chunk_failures > 0 || r.counters.parse_failures > 0 => {
                    tint("problems", RED)
                }
                Some(_) => tint("ok", GREEN),
            };

            println!(
                "{} {} [{}] {} → {}",
                tint(format!("#{}", r.id), CYAN),
                r.started_at,
                status,
                truncate(&r.dump_file, 50),
                r.target
            );
            println!(
                "    statements {} | tables {} | rows {}/{} | skipped {} | failed chunks {}",
                r.counters.statements,
                r.counters.tables,
                r.counters.rows_written,
                r.counters.rows_parsed,
                colorize_count(r.counters.parse_failures, YELLOW),
                colorize_count(r.counters.chunk_failures, RED),
            );
        }

        Ok(())
    }
}
