use crate::db::Database;
use crate::error::Result;
use devlens_types::TableDescriptor;
use std::collections::HashMap;
use std::sync::RwLock;

/// Internal bookkeeping tables hidden from the browser.
const EXCLUDED: &[&str] = &[
    "schema_migrations",
    "ar_internal_metadata",
    "_sqlx_migrations",
    "refinery_schema_history",
    "sqlite_sequence",
];

/// Enumerates browsable tables and their column/key metadata.
///
/// The schema is assumed stable for the process lifetime, so both the table
/// listing and per-table descriptors are cached on first access. The caches
/// are populated idempotently: a race that computes the same descriptor
/// twice writes the same value twice.
#[derive(Debug, Default)]
pub struct TableCatalog {
    names: RwLock<Option<Vec<String>>>,
    descriptors: RwLock<HashMap<String, TableDescriptor>>,
}

impl TableCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sorted browsable table names, minus the bookkeeping denylist.
    pub fn table_names(&self, db: &Database) -> Result<Vec<String>> {
        if let Some(names) = self.names.read().expect("catalog lock poisoned").as_ref() {
            return Ok(names.clone());
        }

        let names: Vec<String> = db
            .table_names()?
            .into_iter()
            .filter(|n| !EXCLUDED.contains(&n.as_str()))
            .collect();

        *self.names.write().expect("catalog lock poisoned") = Some(names.clone());
        Ok(names)
    }

    /// Metadata for one table, or `Ok(None)` when the name is not in the
    /// catalog. Only cataloged names ever reach the schema introspection
    /// queries, which keeps arbitrary identifiers out of SQL entirely.
    pub fn descriptor(&self, db: &Database, name: &str) -> Result<Option<TableDescriptor>> {
        if !self.table_names(db)?.iter().any(|n| n == name) {
            return Ok(None);
        }

        if let Some(desc) = self
            .descriptors
            .read()
            .expect("catalog lock poisoned")
            .get(name)
        {
            return Ok(Some(desc.clone()));
        }

        let desc = db.describe_table(name)?;
        self.descriptors
            .write()
            .expect("catalog lock poisoned")
            .insert(name.to_string(), desc.clone());

        Ok(Some(desc))
    }
}
