//! Error types for the fallible library operations.
//!
//! Problems found in model sources are never errors: they are reported as
//! [`Diagnostic`](crate::hir::Diagnostic)s. This enum only covers the I/O
//! facing entry points (editorconfig lookup, directory scanning).

use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by file-system facing operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error while reading a file or directory.
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory traversal error on the scanned root.
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

impl Error {
    /// Create an IO error for the given path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias for fallible library operations.
pub type Result<T> = std::result::Result<T, Error>;
