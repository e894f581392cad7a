//! Error taxonomy shared by every Quill crate.
//!
//! Each crate owns its own `thiserror` enum with domain context (paths, status codes,
//! template names). Those enums implement [`Classify`] so callers can branch on the
//! coarse [`ErrorKind`] without matching every variant.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Coarse classification of a failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A template identifier, template file or template directory does not exist.
    NotFound,
    /// The completion service failed: transport, authentication or malformed response.
    Inference,
    /// Filesystem read/write/enumerate failure.
    Io,
    /// The external video extractor exited non-zero or produced unusable output.
    ExternalTool,
    /// The caller asked for something the current state cannot satisfy.
    InvalidInput,
}

impl ErrorKind {
    /// Stable lowercase label for logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Inference => "inference",
            Self::Io => "io",
            Self::ExternalTool => "external_tool",
            Self::InvalidInput => "invalid_input",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps a domain error onto the shared [`ErrorKind`] taxonomy.
pub trait Classify {
    /// The coarse kind of this error.
    fn kind(&self) -> ErrorKind;

    /// Shorthand for `kind() == ErrorKind::NotFound`.
    fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
