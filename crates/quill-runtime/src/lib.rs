//! # quill-runtime
//!
//! Chained generation on top of the prompt store and an inference client.
//!
//! - [`PromptClient`]: renders named templates and sends them for completion
//! - [`ArticleGenerator`]: builds an [`Article`] section by section, each
//!   request carrying the article written so far, and regenerates single
//!   sections on demand
//! - [`NoteBuilder`] / [`Note`]: markdown notes with a metadata card
//! - [`agents`]: one-shot note writers that read the vault, prompt, and save

#![deny(unsafe_code)]

pub mod agents;
pub mod client;
pub mod document;
pub mod errors;
pub mod generator;
pub mod note;

pub use agents::{NoteRequest, RegularNoteAgent, SavedNote, VideoNoteAgent, VideoNoteRequest};
pub use client::PromptClient;
pub use document::Article;
pub use errors::{Result, RuntimeError};
pub use generator::{ArticleGenerator, GeneratorState};
pub use note::{Note, NoteBuilder, NoteCard};
