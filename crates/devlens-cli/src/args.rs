use crate::types::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "devlens")]
#[command(about = "In-process developer dashboard: traces, tables, dependencies", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Root of the application under inspection
    #[arg(long, default_value = ".", global = true)]
    pub project_root: PathBuf,

    /// Configuration file (defaults to <project_root>/devlens.toml,
    /// overridable via DEVLENS_CONFIG)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// SQLite database to browse
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the embedded dashboard server
    Serve {
        /// Bind address, e.g. 127.0.0.1:9292
        #[arg(long)]
        bind: Option<String>,
    },

    /// List browsable tables, or page through one
    Tables {
        /// Table to page through; omit to list the catalog
        table: Option<String>,

        #[arg(long, default_value_t = 1)]
        page: i64,

        #[arg(long, default_value_t = 0)]
        per_page: i64,
    },

    /// Categorize a raw stack trace from a file or stdin
    Trace {
        /// Trace file, one frame per line; stdin when omitted
        file: Option<PathBuf>,
    },

    /// List dependencies from the project's lock file
    Crates {
        /// Show one crate in detail
        name: Option<String>,
    },
}
