//! Vault error types.

use std::path::PathBuf;

use quill_core::{Classify, ErrorKind};
use thiserror::Error;

/// Errors from notes directory operations.
#[derive(Debug, Error)]
pub enum VaultError {
    /// Enumerate, read or write failed.
    #[error("vault I/O error at {}: {source}", path.display())]
    Io {
        /// File or directory involved.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: std::io::Error,
    },

    /// A note name that would escape the vault directory.
    #[error("invalid note file name: {name:?}")]
    InvalidName {
        /// Rejected name.
        name: String,
    },
}

impl VaultError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl Classify for VaultError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Io { .. } => ErrorKind::Io,
            Self::InvalidName { .. } => ErrorKind::InvalidInput,
        }
    }
}

/// Result type for vault operations.
pub type Result<T> = std::result::Result<T, VaultError>;
