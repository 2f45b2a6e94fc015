use serde::{Deserialize, Serialize};
use std::path::Path;

/// One resolved dependency from the application's lock file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrateInfo {
    pub name: String,
    pub version: String,
    /// Registry or git source; absent for workspace-local packages.
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub dependencies: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct LockFile {
    #[serde(default)]
    package: Vec<CrateInfo>,
}

/// The dependency catalog of the application under inspection, read once
/// from Cargo.lock at startup. The lock file is TOML; nothing here talks to
/// the network or to cargo itself.
#[derive(Debug, Clone, Default)]
pub struct CrateManifest {
    packages: Vec<CrateInfo>,
}

impl CrateManifest {
    /// Parse a lock file. A missing file is an empty manifest, not an
    /// error: the dashboard stays useful for projects without one.
    pub fn load(lock_path: &Path) -> anyhow::Result<Self> {
        if !lock_path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(lock_path)?;
        let lock: LockFile = toml::from_str(&content)?;

        let mut packages = lock.package;
        packages.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(Self { packages })
    }

    pub fn packages(&self) -> &[CrateInfo] {
        &self.packages
    }

    pub fn find(&self, name: &str) -> Option<&CrateInfo> {
        self.packages.iter().find(|p| p.name == name)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}
