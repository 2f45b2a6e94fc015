use std::fmt;
use std::path::PathBuf;

/// Result type for devlens-trace operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for guarded source extraction.
///
/// The gateway's policy checks are ordered and short-circuiting, so the
/// variant reported for a given request is the first rule that failed.
/// Frame parsing and categorization never produce errors at all.
#[derive(Debug)]
pub enum Error {
    /// Malformed caller input (empty path, non-positive line)
    InvalidRequest(String),

    /// File missing, not a regular file, or empty
    NotFound(PathBuf),

    /// Canonical path falls outside every allow-listed root
    AccessDenied(PathBuf),

    /// Unexpected I/O failure after the path passed all policy checks
    Read(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            Error::NotFound(path) => write!(f, "File not found: {}", path.display()),
            Error::AccessDenied(path) => write!(f, "Access denied: {}", path.display()),
            Error::Read(err) => write!(f, "Read error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Read(err) => Some(err),
            Error::InvalidRequest(_) | Error::NotFound(_) | Error::AccessDenied(_) => None,
        }
    }
}
