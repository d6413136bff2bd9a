//! dumprestore library root.
//! Exposes the SQL dump parser, the replay logic and the CLI entry point.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod sink;
pub mod sql;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use std::path::{Path, PathBuf};

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config, config_path: &Path) -> AppResult<()> {
    match &cli.command {
        Commands::Init { .. } => cli::commands::init::handle(cli, cfg, config_path),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Parse { .. } => cli::commands::parse::handle(&cli.command, cfg),
        Commands::Restore { .. } => cli::commands::restore::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(Config::config_file);

    let mut cfg = Config::load(&config_path)?;

    if let Some(journal) = &cli.journal {
        cfg.journal = journal.clone();
    }

    dispatch(&cli, &cfg, &config_path)
}
