use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::restore::{RestoreLogic, RestoreOptions};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::sink::{DryRunSink, RestSink, SqliteSink, Target, UpsertSink};
use crate::ui::messages::warning;
use indexmap::IndexMap;
use std::path::Path;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Restore {
        dump,
        target,
        sqlite,
        chunk_size,
        tables,
    } = cmd
    {
        let mut sink: Box<dyn UpsertSink> = match target {
            Target::Rest => Box::new(RestSink::new(cfg)?),
            Target::Sqlite => {
                let path = sqlite.as_deref().ok_or_else(|| {
                    AppError::Config("--sqlite FILE is required with --target sqlite".into())
                })?;
                let keys: IndexMap<String, Vec<String>> = cfg
                    .conflict_keys
                    .keys()
                    .filter_map(|t| cfg.conflict_key(t).map(|k| (t.clone(), k)))
                    .collect();
                Box::new(SqliteSink::open(path, keys)?)
            }
            Target::DryRun => Box::new(DryRunSink::new()),
        };

        let mut opts = RestoreOptions::from_config(cfg);
        if let Some(n) = chunk_size {
            opts.chunk_size = *n;
        }
        opts.tables = tables.clone();

        if opts.chunk_size == 0 {
            return Err(AppError::Config("chunk size must be greater than 0".into()));
        }

        // the journal is optional: a restore must not fail because of it
        let journal = match DbPool::open_journal(&cfg.journal) {
            Ok(pool) => Some(pool),
            Err(e) => {
                warning(format!("Journal unavailable ({}): {}", cfg.journal, e));
                None
            }
        };

        RestoreLogic::restore_file(
            cfg,
            Path::new(dump),
            sink.as_mut(),
            &opts,
            journal.as_ref().map(|p| &p.conn),
        )?;
    }

    Ok(())
}
