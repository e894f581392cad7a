//! Media error types.

use quill_core::{Classify, ErrorKind};
use thiserror::Error;

/// Errors from running the extractor or interpreting its output.
#[derive(Debug, Error)]
pub enum MediaError {
    /// The executable could not be started.
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        /// Executable name or path.
        program: String,
        /// Underlying failure.
        #[source]
        source: std::io::Error,
    },

    /// The process exited non-zero.
    #[error("{program} exited with status {status}: {stderr}")]
    Failed {
        /// Executable name or path.
        program: String,
        /// Exit code, `-1` when killed by a signal.
        status: i32,
        /// Captured standard error.
        stderr: String,
    },

    /// The process exceeded its timeout and was killed.
    #[error("{program} timed out after {timeout_secs}s")]
    TimedOut {
        /// Executable name or path.
        program: String,
        /// Configured timeout.
        timeout_secs: u64,
    },

    /// Metadata output was not the expected JSON.
    #[error("failed to parse video metadata: {0}")]
    Parse(#[from] serde_json::Error),

    /// The extractor succeeded but wrote no subtitle file.
    #[error("no transcript produced for {url}")]
    TranscriptMissing {
        /// Video URL.
        url: String,
    },

    /// Temporary directory or subtitle file I/O failed.
    #[error("media I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Classify for MediaError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::ExternalTool
    }
}

/// Result type for media operations.
pub type Result<T> = std::result::Result<T, MediaError>;
