//! Generator error types.

use std::io;
use std::path::PathBuf;

use embedfs::VfsError;
use thiserror::Error;

/// Generator error type.
#[derive(Debug, Error)]
pub enum GenError {
    /// Walking or reading the source tree failed.
    #[error(transparent)]
    Vfs(#[from] VfsError),

    /// Writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Config file could not be read.
    #[error("cannot read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Config file is not valid TOML for [`GenConfig`](crate::GenConfig).
    #[error("invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Required setting missing or inconsistent.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl GenError {
    /// Create a Config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Generator result type.
pub type GenResult<T> = Result<T, GenError>;
