use serde::{Deserialize, Serialize};

/// Code layer a stack frame is attributed to.
///
/// Every frame gets exactly one category; anything unrecognized falls back
/// to `Framework` (host-framework internals).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameCategory {
    Application,
    Library,
    Configuration,
    Dependency,
    Runtime,
    Framework,
}

impl FrameCategory {
    pub fn label(&self) -> &'static str {
        match self {
            FrameCategory::Application => "Application",
            FrameCategory::Library => "Library",
            FrameCategory::Configuration => "Configuration",
            FrameCategory::Dependency => "Dependency",
            FrameCategory::Runtime => "Runtime",
            FrameCategory::Framework => "Framework",
        }
    }
}

/// One parsed entry of a stack trace.
///
/// `file`, `line` and `method` are all absent for frames that did not match
/// the expected `path:line[:in 'method']` shape; the raw text is always kept
/// so no frame is ever dropped from the output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackFrame {
    pub raw: String,
    pub file: Option<String>,
    pub line: Option<u32>,
    pub method: Option<String>,
    pub category: FrameCategory,
}

/// A run of adjacent frames sharing one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameGroup {
    pub category: FrameCategory,
    pub frames: Vec<StackFrame>,
}

/// Ordered trace partitioned into contiguous same-category runs.
///
/// Grouping only merges adjacent frames; flattening the groups reproduces
/// the original frame order exactly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupedTrace {
    pub groups: Vec<FrameGroup>,
}

impl GroupedTrace {
    /// Iterate frames in original trace order, across group boundaries.
    pub fn frames(&self) -> impl Iterator<Item = &StackFrame> {
        self.groups.iter().flat_map(|g| g.frames.iter())
    }

    pub fn frame_count(&self) -> usize {
        self.groups.iter().map(|g| g.frames.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Caught-exception input surface: class name, message and raw frames as
/// handed over by the host application. An empty frame list is allowed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExceptionReport {
    pub class_name: String,
    pub message: String,
    #[serde(default)]
    pub frames: Vec<String>,
}
