use chrono::{DateTime, NaiveDate, NaiveDateTime};
use devlens_types::CellValue;

/// Display marker for SQL NULL. Deliberately not the empty string so that
/// a NULL cell and an empty text cell remain distinguishable in any grid.
pub const NULL_MARKER: &str = "NULL";

/// Render one cell of unknown shape into a display string.
///
/// Rules, first match wins: NULL marker; structured text as compact JSON
/// (best effort, the raw text on any parse failure); temporal text as
/// ISO-8601; blobs as a size placeholder; everything else in its natural
/// form.
pub fn format_cell(value: &CellValue) -> String {
    match value {
        CellValue::Null => NULL_MARKER.to_string(),
        CellValue::Integer(i) => i.to_string(),
        CellValue::Real(r) => r.to_string(),
        CellValue::Blob(b) => format!("<{} bytes>", b.len()),
        CellValue::Text(t) => format_text(t),
    }
}

fn format_text(text: &str) -> String {
    if looks_structured(text) {
        // Re-serialize rather than echo so nested whitespace collapses; a
        // value that merely looks structured falls back to the raw text.
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(text) {
            if let Ok(compact) = serde_json::to_string(&value) {
                return compact;
            }
        }
        return text.to_string();
    }

    if let Some(iso) = format_temporal(text) {
        return iso;
    }

    text.to_string()
}

fn looks_structured(text: &str) -> bool {
    let trimmed = text.trim_start();
    trimmed.starts_with('{') || trimmed.starts_with('[')
}

fn format_temporal(text: &str) -> Option<String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.to_rfc3339());
    }
    // SQLite's conventional "YYYY-MM-DD HH:MM:SS[.fff]" datetime text.
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string());
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date.format("%Y-%m-%d").to_string());
    }
    None
}
