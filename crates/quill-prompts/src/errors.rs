//! Prompt store errors.

use std::path::PathBuf;

use quill_core::{Classify, ErrorKind};
use thiserror::Error;

/// Errors raised while listing or loading templates.
#[derive(Debug, Error)]
pub enum PromptError {
    /// The template directory is missing or unreadable.
    #[error("prompt directory unavailable: {}: {source}", path.display())]
    DirectoryUnavailable {
        /// Directory that was scanned.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// No readable template matches the identifier or file name.
    #[error("prompt {name} not found")]
    TemplateNotFound {
        /// Identifier or file name that was requested.
        name: String,
        /// Read failure, when a candidate file existed but could not be read.
        #[source]
        source: Option<std::io::Error>,
    },
}

impl Classify for PromptError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::NotFound
    }
}

/// Result type for prompt operations.
pub type Result<T> = std::result::Result<T, PromptError>;
