use crate::catalog::TableCatalog;
use crate::db::Database;
use crate::error::{Error, Result};
use devlens_types::RowPage;

/// Hard ceiling on page size, regardless of caller input.
pub const MAX_PER_PAGE: u32 = 500;

/// Page size used when the caller supplies none, zero or a negative value.
pub const DEFAULT_PER_PAGE: u32 = 50;

/// Clamp a requested page number to `>= 1`.
pub fn clamp_page(page: i64) -> u32 {
    if page < 1 {
        1
    } else {
        page.min(i64::from(u32::MAX)) as u32
    }
}

/// Clamp a requested page size into `[1, MAX_PER_PAGE]`, substituting the
/// default for non-positive input.
pub fn clamp_per_page(per_page: i64) -> u32 {
    if per_page <= 0 {
        DEFAULT_PER_PAGE
    } else if per_page > i64::from(MAX_PER_PAGE) {
        MAX_PER_PAGE
    } else {
        per_page as u32
    }
}

/// Builds paginated, deterministically ordered views over arbitrary tables.
///
/// Ordering is by primary key when the table has one, which keeps pages
/// stable; without a key the order is storage-defined and pages may overlap
/// or skip rows under concurrent writes.
pub struct TableBrowser<'a> {
    db: &'a Database,
    catalog: &'a TableCatalog,
}

impl<'a> TableBrowser<'a> {
    pub fn new(db: &'a Database, catalog: &'a TableCatalog) -> Self {
        Self { db, catalog }
    }

    /// One page of rows plus the total count.
    ///
    /// The table name must be one the catalog returned; anything else is
    /// `TableNotFound` before any query is issued. An offset at or past the
    /// total yields an empty page, not an error, and skips the select.
    pub fn fetch_page(&self, table: &str, page: i64, per_page: i64) -> Result<RowPage> {
        let descriptor = self
            .catalog
            .descriptor(self.db, table)?
            .ok_or_else(|| Error::TableNotFound(table.to_string()))?;

        let page = clamp_page(page);
        let per_page = clamp_per_page(per_page);
        let offset = u64::from(page - 1) * u64::from(per_page);

        let total = self.db.count_rows(&descriptor.name)?;
        let rows = if offset >= total {
            Vec::new()
        } else {
            self.db.select_page(&descriptor, per_page, offset)?
        };

        Ok(RowPage {
            columns: descriptor.columns,
            rows,
            total,
            page,
            per_page,
        })
    }
}
