use crate::types::OutputFormat;
use anyhow::{bail, Result};
use devlens_server::{Config, CrateManifest};
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;

pub fn handle(config: &Config, name: Option<&str>, format: OutputFormat) -> Result<()> {
    let manifest = CrateManifest::load(&config.lock_file_path())?;

    if let Some(name) = name {
        let Some(info) = manifest.find(name) else {
            bail!("Crate not found in lock file: {}", name);
        };

        if format.is_json() {
            println!("{}", serde_json::to_string_pretty(info)?);
        } else {
            println!("{} {}", info.name, info.version);
            if let Some(source) = &info.source {
                println!("source: {}", source);
            }
            if !info.dependencies.is_empty() {
                println!("dependencies: {}", info.dependencies.join(", "));
            }
        }
        return Ok(());
    }

    if format.is_json() {
        println!("{}", serde_json::to_string_pretty(manifest.packages())?);
        return Ok(());
    }

    if manifest.is_empty() {
        println!("No lock file found at {}", config.lock_file_path().display());
        return Ok(());
    }

    let color = std::io::stdout().is_terminal();
    for pkg in manifest.packages() {
        if color {
            println!("{} {}", pkg.name.bold(), pkg.version.dimmed());
        } else {
            println!("{} {}", pkg.name, pkg.version);
        }
    }

    Ok(())
}
