use crate::config::Config;
use crate::deps::CrateManifest;
use devlens_index::{Database, TableCatalog};
use devlens_trace::{Categorizer, SourceGateway};
use std::sync::{Arc, Mutex};

/// Shared handles for request handlers.
///
/// The SQLite connection is not Sync, so it sits behind a Mutex; every
/// operation against it is a single short query. The catalog caches are
/// internally synchronized, and the gateway, categorizer and crate manifest
/// are immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub db: Option<Arc<Mutex<Database>>>,
    pub catalog: Arc<TableCatalog>,
    pub gateway: Arc<SourceGateway>,
    pub categorizer: Arc<Categorizer>,
    pub manifest: Arc<CrateManifest>,
}

impl AppState {
    /// Wire up state from configuration. Fails only when an explicitly
    /// configured database or lock file cannot be read.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let db = match &config.database {
            Some(path) => Some(Arc::new(Mutex::new(Database::open(path)?))),
            None => None,
        };

        let gateway = SourceGateway::new(config.project_root.clone())
            .with_roots(config.allowed_roots.iter().cloned());
        let manifest = CrateManifest::load(&config.lock_file_path())?;

        Ok(Self {
            db,
            catalog: Arc::new(TableCatalog::new()),
            gateway: Arc::new(gateway),
            categorizer: Arc::new(Categorizer::new(&config.project_root)),
            manifest: Arc::new(manifest),
        })
    }
}
