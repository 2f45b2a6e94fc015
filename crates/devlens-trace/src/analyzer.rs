use crate::categorize::Categorizer;
use crate::gateway::SourceGateway;
use crate::parser::parse_frame;
use devlens_types::{ExceptionReport, FrameCategory, FrameGroup, GroupedTrace, SourceExtract, StackFrame};
use once_cell::unsync::OnceCell;

/// Turns one caught exception into a categorized, navigable trace.
///
/// Composes the frame parser, the categorizer and (on demand) the source
/// gateway. The grouped trace is a pure function of the report and is
/// computed once per analyzer instance.
pub struct ExceptionAnalyzer {
    report: ExceptionReport,
    categorizer: Categorizer,
    grouped: OnceCell<GroupedTrace>,
}

impl ExceptionAnalyzer {
    pub fn new(report: ExceptionReport, categorizer: Categorizer) -> Self {
        Self {
            report,
            categorizer,
            grouped: OnceCell::new(),
        }
    }

    pub fn class_name(&self) -> &str {
        &self.report.class_name
    }

    pub fn message(&self) -> &str {
        &self.report.message
    }

    /// All frames parsed and categorized, with adjacent same-category
    /// frames folded into groups. Original order is preserved and no frame
    /// is dropped, including unparseable ones.
    pub fn grouped_trace(&self) -> &GroupedTrace {
        self.grouped.get_or_init(|| self.build_grouped_trace())
    }

    /// The first Application frame, falling back to the very first frame
    /// of any category. `None` only for an empty trace.
    pub fn first_application_frame(&self) -> Option<&StackFrame> {
        let trace = self.grouped_trace();
        trace
            .frames()
            .find(|f| f.category == FrameCategory::Application)
            .or_else(|| trace.frames().next())
    }

    /// Source extract for the default frame, when one can be shown.
    ///
    /// "No source available" is a normal, displayable state: a frame
    /// without file or line, a missing file, or a gateway rejection all
    /// yield `None`, never an error.
    pub fn default_extract(&self, gateway: &SourceGateway) -> Option<SourceExtract> {
        let frame = self.first_application_frame()?;
        let file = frame.file.as_deref()?;
        let line = frame.line?;
        gateway.extract(file, i64::from(line)).ok()
    }

    fn build_grouped_trace(&self) -> GroupedTrace {
        let mut groups: Vec<FrameGroup> = Vec::new();

        for raw in &self.report.frames {
            let (file, line, method) = parse_frame(raw);
            let category = self.categorizer.categorize(raw);
            let frame = StackFrame {
                raw: raw.clone(),
                file,
                line,
                method,
                category,
            };

            match groups.last_mut() {
                Some(group) if group.category == category => group.frames.push(frame),
                _ => groups.push(FrameGroup {
                    category,
                    frames: vec![frame],
                }),
            }
        }

        GroupedTrace { groups }
    }
}
