use crate::error::Result;
use devlens_types::{CellValue, TableDescriptor};
use rusqlite::types::ValueRef;
use rusqlite::Connection;
use std::path::Path;

/// Thin wrapper over the application's SQLite connection.
///
/// The browser operates over tables whose shape is unknown until runtime,
/// so nothing here assumes any particular schema. Table and column names
/// always come from schema introspection, never from user input, and are
/// still quoted as identifiers before they reach any SQL text.
pub struct Database {
    conn: Connection,
}

/// Quote an identifier for SQLite, doubling embedded double quotes.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

impl Database {
    pub fn open(db_path: &Path) -> Result<Self> {
        let conn = Connection::open(db_path)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Raw batch execution, used by tests and fixtures.
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        self.conn.execute_batch(sql)?;
        Ok(())
    }

    /// All user table names, sorted. SQLite internals (`sqlite_%`) are
    /// excluded here; the bookkeeping denylist lives in the catalog.
    pub fn table_names(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT name
            FROM sqlite_master
            WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
            ORDER BY name
            "#,
        )?;

        let names = stmt
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<Vec<String>, _>>()?;

        Ok(names)
    }

    /// Ordered column names and the primary-key column for one table.
    ///
    /// Composite keys keep only the first key column (pk sequence 1); a
    /// table without any key yields `primary_key = None`.
    pub fn describe_table(&self, name: &str) -> Result<TableDescriptor> {
        let sql = format!("PRAGMA table_info({})", quote_ident(name));
        let mut stmt = self.conn.prepare(&sql)?;

        let mut columns = Vec::new();
        let mut primary_key = None;

        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            let col_name: String = row.get("name")?;
            let pk_seq: i64 = row.get("pk")?;
            if pk_seq == 1 {
                primary_key = Some(col_name.clone());
            }
            columns.push(col_name);
        }

        Ok(TableDescriptor {
            name: name.to_string(),
            columns,
            primary_key,
        })
    }

    pub fn count_rows(&self, table: &str) -> Result<u64> {
        let sql = format!("SELECT COUNT(*) FROM {}", quote_ident(table));
        let count: i64 = self.conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// One bounded page of rows in the descriptor's column order. LIMIT and
    /// OFFSET are bound parameters; identifiers are quoted, never literal.
    pub fn select_page(
        &self,
        descriptor: &TableDescriptor,
        limit: u32,
        offset: u64,
    ) -> Result<Vec<Vec<CellValue>>> {
        let table = quote_ident(&descriptor.name);
        let order = match &descriptor.primary_key {
            Some(pk) => format!("ORDER BY {}.{}", table, quote_ident(pk)),
            None => String::new(),
        };
        let sql = format!("SELECT * FROM {} {} LIMIT ?1 OFFSET ?2", table, order);

        let mut stmt = self.conn.prepare(&sql)?;
        let column_count = stmt.column_count();

        let rows = stmt
            .query_map(rusqlite::params![limit, offset as i64], |row| {
                let mut cells = Vec::with_capacity(column_count);
                for idx in 0..column_count {
                    cells.push(cell_from_ref(row.get_ref(idx)?));
                }
                Ok(cells)
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(rows)
    }
}

fn cell_from_ref(value: ValueRef<'_>) -> CellValue {
    match value {
        ValueRef::Null => CellValue::Null,
        ValueRef::Integer(i) => CellValue::Integer(i),
        ValueRef::Real(r) => CellValue::Real(r),
        ValueRef::Text(t) => CellValue::Text(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Blob(b) => CellValue::Blob(b.to_vec()),
    }
}
