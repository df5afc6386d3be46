//! Crate error types.
//!
//! Provides unified error handling with actionable context for debugging.

use thiserror::Error;

/// Crate result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by file loading and strict-mode parsing
///
/// Lenient parsing has no failure mode at all: malformed lines are
/// dropped one at a time and an empty result is still `Ok`. An `Err`
/// therefore always means "input rejected", never "input empty".
#[derive(Debug, Error)]
pub enum Error {
    /// IO error with path context
    #[error("IO error at {path:?}: {source}")]
    Io {
        /// The underlying IO error.
        source: std::io::Error,
        /// File path where the error occurred, if known.
        path: Option<std::path::PathBuf>,
    },

    /// Line rejected by strict-mode parsing
    #[error("Parse error at line {line}: {message}")]
    Parse {
        /// 1-based line number within the input text.
        line: usize,
        /// Description of the malformed time tag.
        message: String,
    },
}

impl Error {
    /// Create an IO error with path context
    pub fn io(source: std::io::Error, path: impl Into<Option<std::path::PathBuf>>) -> Self {
        Self::Io { source, path: path.into() }
    }

    /// Create a parse error for a rejected line
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse { line, message: message.into() }
    }
}

// Convenience conversion
impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io { source: e, path: None }
    }
}
