//! VFS error types.

use std::io;
use thiserror::Error;

/// VFS error type.
#[derive(Debug, Error)]
pub enum VfsError {
    /// Path is absent, out of scope, or ignored.
    ///
    /// The three cases are indistinguishable; a
    /// [`LocalFs`](super::backends::LocalFs) never says why a path is hidden.
    #[error("not found: {0}")]
    NotFound(String),

    /// An ignore pattern is not a valid regular expression.
    #[error("invalid ignore pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Invalid prefix/root configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Content producer or decompression failure.
    #[error("content error for {path}: {source}")]
    Content {
        path: String,
        #[source]
        source: io::Error,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl VfsError {
    /// Create a NotFound error.
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound(path.into())
    }

    /// Create a Config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a Content error.
    pub fn content(path: impl Into<String>, source: io::Error) -> Self {
        Self::Content {
            path: path.into(),
            source,
        }
    }

    /// Map a host I/O error for `path`, folding host NotFound into ours.
    pub(crate) fn from_host(path: &str, e: io::Error) -> Self {
        if e.kind() == io::ErrorKind::NotFound {
            Self::not_found(path)
        } else {
            Self::Io(e)
        }
    }

    /// Returns true for [`VfsError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, VfsError::NotFound(_))
    }
}

/// Convert VfsError to std::io::Error for compatibility.
impl From<VfsError> for io::Error {
    fn from(e: VfsError) -> Self {
        match e {
            VfsError::NotFound(msg) => io::Error::new(io::ErrorKind::NotFound, msg),
            e @ VfsError::InvalidPattern { .. } => {
                io::Error::new(io::ErrorKind::InvalidInput, e.to_string())
            }
            VfsError::Config(msg) => io::Error::new(io::ErrorKind::InvalidInput, msg),
            e @ VfsError::Content { .. } => {
                io::Error::new(io::ErrorKind::InvalidData, e.to_string())
            }
            VfsError::Io(e) => e,
        }
    }
}

/// VFS result type.
pub type VfsResult<T> = Result<T, VfsError>;
