pub mod browser;
pub mod catalog;
pub mod db;
pub mod error;
pub mod format;

pub use browser::{TableBrowser, DEFAULT_PER_PAGE, MAX_PER_PAGE};
pub use catalog::TableCatalog;
pub use db::Database;
pub use error::{Error, Result};
pub use format::{format_cell, NULL_MARKER};
