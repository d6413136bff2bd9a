use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::db::log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use std::path::Path;

/// Handle the `init` command
///
/// This initializes:
///  - the configuration file (skipped in test mode or when it already exists)
///  - the journal database and its migrations
pub fn handle(cli: &Cli, cfg: &Config, config_path: &Path) -> AppResult<()> {
    let force = matches!(cli.command, Commands::Init { force: true });

    println!("⚙️  Initializing dumprestore…");

    if cli.test {
        info("Test mode: configuration file not written");
    } else if config_path.exists() && !force {
        info(format!(
            "Config file already exists: {} (use --force to overwrite)",
            config_path.display()
        ));
    } else {
        cfg.save(config_path)?;
        success(format!("Config file: {}", config_path.display()));
    }

    let pool = DbPool::open_journal(&cfg.journal)?;
    success(format!("Journal:     {}", cfg.journal));

    if let Err(e) = log::ttlog(
        &pool.conn,
        "init",
        &cfg.journal,
        &format!("Journal initialized at {}", cfg.journal),
    ) {
        warning(format!("Failed to write internal log: {}", e));
    }

    println!("🎉 dumprestore initialization completed!");
    Ok(())
}
