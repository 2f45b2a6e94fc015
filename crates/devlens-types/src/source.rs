use serde::{Deserialize, Serialize};

/// One line of an extracted source file, tagged with its 1-based number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceLine {
    pub number: u32,
    pub content: String,
    pub highlighted: bool,
}

/// Full content of one source file plus highlight metadata.
///
/// The whole file is carried, not a window around the target line; at most
/// one line is highlighted, and only when the requested line number falls
/// within `[1, total_lines]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceExtract {
    /// Path relative to the project root when contained there, otherwise
    /// the path as requested.
    pub file: String,
    pub line_number: u32,
    pub total_lines: u32,
    pub lines: Vec<SourceLine>,
}

impl SourceExtract {
    /// The highlighted line, if the requested line was in range.
    pub fn highlighted_line(&self) -> Option<&SourceLine> {
        self.lines.iter().find(|l| l.highlighted)
    }
}
