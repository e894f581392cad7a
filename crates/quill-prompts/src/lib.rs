//! # quill-prompts
//!
//! Prompt templates for Quill.
//!
//! - [`PromptStore`] resolves normalized identifiers (`ARTICLE_GENERATOR_INITIAL`)
//!   to template files (`articleGeneratorInitial.prompt`) in a directory
//! - [`render`] substitutes `<<NAME>>` placeholders from a [`Placeholders`] set

#![deny(unsafe_code)]

pub mod engine;
pub mod errors;
pub mod store;

pub use engine::{Placeholders, placeholder_names, render};
pub use errors::{PromptError, Result};
pub use store::{DEFAULT_SUFFIX, PromptStore, normalize_identifier};
