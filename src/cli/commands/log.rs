use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::log::LogLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Log { print, runs } = cmd {
        let pool = DbPool::open_journal(&cfg.journal)?;

        if *print || !*runs {
            LogLogic::print_log(&pool)?;
        }
        if *runs {
            if *print {
                println!();
            }
            LogLogic::print_runs(&pool)?;
        }
    }

    Ok(())
}
