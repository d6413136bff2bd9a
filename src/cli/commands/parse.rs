use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::input::read_dump;
use crate::core::parse::{ParseLogic, ParseReport};
use crate::errors::AppResult;
use crate::export::{ExportFormat, ExportLogic};
use crate::sql::SplitOptions;
use crate::ui::messages::{info, warning};
use crate::utils::table::{Align, Table};
use std::path::Path;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Parse {
        dump,
        format,
        out,
        force,
    } = cmd
    {
        let text = read_dump(Path::new(dump))?;
        let report = ParseLogic::parse_dump(
            &text,
            &SplitOptions {
                strip_line_comments: cfg.strip_comments,
            },
        );

        print_summary(&report);

        if let Some(out) = out {
            let format = format.unwrap_or(ExportFormat::Json);
            ExportLogic::export(&report.batches, format, Path::new(out), *force)?;
        }
    }

    Ok(())
}

fn print_summary(report: &ParseReport) {
    info(format!(
        "{} statement(s), {} insert(s), {} row(s) in {} table(s)",
        report.statements,
        report.inserts,
        report.rows(),
        report.batches.table_count()
    ));

    if !report.batches.is_empty() {
        let mut table = Table::new(&[
            ("TABLE", Align::Left),
            ("ROWS", Align::Right),
            ("COLUMNS", Align::Left),
        ]);
        for (name, rows) in report.batches.iter() {
            table.add_row(vec![
                name.clone(),
                rows.len().to_string(),
                report.batches.columns(name).join(", "),
            ]);
        }
        println!();
        print!("{}", table.render());
        println!();
    }

    if !report.failures.is_empty() {
        warning(format!(
            "{} statement(s) skipped",
            report.failures.len()
        ));
    }
}
