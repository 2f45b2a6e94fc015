use crate::args::{Cli, Commands};
use crate::handlers;
use anyhow::Result;
use devlens_server::Config;
use std::path::PathBuf;

pub fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;

    match cli.command {
        Commands::Serve { ref bind } => {
            let bind = bind.clone().unwrap_or_else(|| config.bind.clone());
            handlers::serve::handle(config, &bind)
        }
        Commands::Tables {
            ref table,
            page,
            per_page,
        } => handlers::tables::handle(&config, table.as_deref(), page, per_page, cli.format),
        Commands::Trace { ref file } => {
            handlers::trace::handle(&config, file.as_deref(), cli.format)
        }
        Commands::Crates { ref name } => {
            handlers::crates::handle(&config, name.as_deref(), cli.format)
        }
    }
}

// Config file resolution: --config flag, then DEVLENS_CONFIG, then
// devlens.toml under the project root. Command-line flags win over file
// contents for the fields both can set.
fn load_config(cli: &Cli) -> Result<Config> {
    let path = cli
        .config
        .clone()
        .or_else(|| std::env::var("DEVLENS_CONFIG").ok().map(PathBuf::from))
        .unwrap_or_else(|| cli.project_root.join("devlens.toml"));

    let mut config = Config::load_from(&path)?;

    // "." is clap's default; only an explicit flag overrides the file.
    if cli.project_root != PathBuf::from(".") {
        config.project_root = cli.project_root.clone();
    }
    if let Some(db) = &cli.db {
        config.database = Some(db.clone());
    }

    Ok(config)
}
