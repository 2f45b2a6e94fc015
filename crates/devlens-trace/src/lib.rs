pub mod analyzer;
pub mod categorize;
pub mod error;
pub mod gateway;
pub mod parser;

pub use analyzer::ExceptionAnalyzer;
pub use categorize::{Categorizer, Rule, RuleMatch};
pub use error::{Error, Result};
pub use gateway::SourceGateway;
pub use parser::parse_frame;
