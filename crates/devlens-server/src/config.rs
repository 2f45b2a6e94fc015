use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Dashboard configuration, loaded from a TOML file.
///
/// Every field has a sensible default and a missing file yields
/// `Config::default()`, so a bare `devlens serve` works from a project
/// checkout with no setup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root of the application under inspection.
    pub project_root: PathBuf,

    /// SQLite database to browse. None disables the table endpoints' data
    /// source until provided on the command line.
    pub database: Option<PathBuf>,

    /// Bind address for the embedded server.
    pub bind: String,

    /// Extra allow-list roots for source extraction, beyond the project
    /// root and the toolchain directories.
    pub allowed_roots: Vec<PathBuf>,

    /// Lock file for the dependency listing. Defaults to Cargo.lock under
    /// the project root.
    pub lock_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project_root: PathBuf::from("."),
            database: None,
            bind: "127.0.0.1:9292".to_string(),
            allowed_roots: Vec::new(),
            lock_file: None,
        }
    }
}

impl Config {
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn lock_file_path(&self) -> PathBuf {
        self.lock_file
            .clone()
            .unwrap_or_else(|| self.project_root.join("Cargo.lock"))
    }
}

/// Expand a leading `~/` to the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}
