use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::config::ConfigLogic;
use crate::errors::{AppError, AppResult};

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
    } = cmd
    {
        if *print_config || !*check {
            ConfigLogic::print(cfg)?;
        }

        if *check {
            let problems = ConfigLogic::check(cfg);
            if problems > 0 {
                return Err(AppError::Config(format!(
                    "{} problem(s) found",
                    problems
                )));
            }
        }
    }

    Ok(())
}
