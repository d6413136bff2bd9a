use crate::export::ExportFormat;
use crate::sink::Target;
use clap::{Parser, Subcommand};

/// Command-line interface definition for dumprestore
#[derive(Parser)]
#[command(
    name = "dumprestore",
    version = env!("CARGO_PKG_VERSION"),
    about = "Replay the INSERT statements of a SQL dump into the hosted backend or a local SQLite file",
    long_about = None
)]
pub struct Cli {
    /// Use this configuration file instead of the default one
    #[arg(global = true, long = "config", value_name = "FILE")]
    pub config: Option<String>,

    /// Override the journal database path
    #[arg(global = true, long = "journal", value_name = "FILE")]
    pub journal: Option<String>,

    /// Run in test mode (no config file written)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the configuration file and the journal database
    Init {
        #[arg(long = "force", help = "Overwrite an existing configuration file")]
        force: bool,
    },

    /// Inspect the configuration
    Config {
        #[arg(long = "print", help = "Print the effective configuration")]
        print_config: bool,

        #[arg(
            long = "check",
            help = "Check URL, key, chunk size and the table dependency graph"
        )]
        check: bool,
    },

    /// Parse a dump and summarize or export its rows (nothing is sent)
    Parse {
        /// Dump file (.sql, .sql.gz or .zip)
        #[arg(long, value_name = "FILE")]
        dump: String,

        /// Export format (default: json when --out is given)
        #[arg(long, value_enum, requires = "out")]
        format: Option<ExportFormat>,

        /// Output file (json) or directory (csv)
        #[arg(long, value_name = "PATH")]
        out: Option<String>,

        /// Overwrite output files without confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Parse a dump and upsert its rows into the target
    Restore {
        /// Dump file (.sql, .sql.gz or .zip)
        #[arg(long, value_name = "FILE")]
        dump: String,

        /// Where rows are written
        #[arg(long, value_enum, default_value = "rest")]
        target: Target,

        /// SQLite database file (required with --target sqlite)
        #[arg(long, value_name = "FILE", required_if_eq("target", "sqlite"))]
        sqlite: Option<String>,

        /// Rows per upsert call (default from config, 100)
        #[arg(long = "chunk-size", value_name = "N")]
        chunk_size: Option<usize>,

        /// Only restore this table (repeatable)
        #[arg(long = "table", value_name = "TABLE")]
        tables: Vec<String>,
    },

    /// Print the restore journal
    Log {
        #[arg(long = "print", help = "Print the journal log entries")]
        print: bool,

        #[arg(long = "runs", help = "Print the recorded restore runs")]
        runs: bool,
    },
}
