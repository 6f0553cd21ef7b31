//! Per-request error types.
//!
//! Everything here is recovered at the middleware boundary: the request is
//! handed to the next handler and the error is only reported to tracing and
//! the optional log hook. Setup failures live in [`crate::config::ConfigError`].

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while resolving, checking or compiling a stylesheet.
#[derive(Debug, Error)]
pub enum Error {
    /// No source file exists for the requested stylesheet.
    #[error("sass source file not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// The preprocessor rejected the source file.
    #[error("failed to compile {}: {message}", path.display())]
    Compile { path: PathBuf, message: String },

    /// A post-processor failed on the compiled CSS.
    #[error("post-processing failed: {0}")]
    PostProcess(String),

    /// Filesystem operation failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A blocking compile task panicked or was cancelled.
    #[error("compile task failed: {0}")]
    Task(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// True when the error only means "this stylesheet is not ours".
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::SourceNotFound(_))
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
