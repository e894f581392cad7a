//! One-shot note writers.
//!
//! Each agent gathers context (existing vault pages, optionally video
//! metadata and transcript), renders one template, completes it and saves
//! the assembled note into the vault. Nothing happens until `run` is called.

mod regular;
mod video;

use std::path::PathBuf;

pub use regular::{NoteRequest, REGULAR_NOTE_TEMPLATE, RegularNoteAgent};
pub use video::{VIDEO_NOTE_TEMPLATE, VideoNoteAgent, VideoNoteRequest};

/// A note written to the vault.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SavedNote {
    /// Where the note was written.
    pub path: PathBuf,
    /// Rendered markdown.
    pub content: String,
}
