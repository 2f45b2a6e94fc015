use serde::{Deserialize, Serialize};

/// Metadata for one browsable database table.
///
/// Computed once per table and cached for the process lifetime; a schema
/// change mid-process is out of scope. `primary_key` is the first key column
/// for composite keys, and `None` for tables without one; in that case row
/// ordering is storage-defined and pages may overlap under concurrent
/// writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDescriptor {
    pub name: String,
    pub columns: Vec<String>,
    pub primary_key: Option<String>,
}

/// One raw cell value as it came out of storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

/// One page of table data: rows in column order plus the total row count.
///
/// `rows.len() <= per_page` always holds; `rows` is empty (not an error)
/// when the requested offset is at or past `total`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowPage {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
}

impl RowPage {
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.per_page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_serializes_as_json_null() {
        let json = serde_json::to_string(&CellValue::Null).unwrap();
        assert_eq!(json, "null");

        let row = vec![CellValue::Integer(1), CellValue::Text("x".into()), CellValue::Null];
        assert_eq!(serde_json::to_string(&row).unwrap(), r#"[1,"x",null]"#);
    }

    #[test]
    fn test_page_offset() {
        let page = RowPage {
            columns: vec!["id".into()],
            rows: vec![],
            total: 120,
            page: 3,
            per_page: 50,
        };
        assert_eq!(page.offset(), 100);
    }
}
