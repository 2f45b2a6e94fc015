pub mod frame;
pub mod source;
pub mod table;

pub use frame::{ExceptionReport, FrameCategory, FrameGroup, GroupedTrace, StackFrame};
pub use source::{SourceExtract, SourceLine};
pub use table::{CellValue, RowPage, TableDescriptor};
