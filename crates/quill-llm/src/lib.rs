//! # quill-llm
//!
//! One-shot text completion for Quill.
//!
//! - [`client`]: the [`InferenceClient`] trait and [`CompletionOptions`]
//! - [`openai`]: [`OpenAiClient`] for OpenAI-compatible chat-completions endpoints
//! - [`mock`]: [`MockClient`] with scripted responses and call capture, for tests
//!
//! There is no streaming and no retry. A failed call surfaces as an
//! [`InferenceError`] and the caller decides what to do next.

#![deny(unsafe_code)]

pub mod client;
pub mod errors;
pub mod mock;
pub mod openai;

pub use client::{CompletionOptions, InferenceClient};
pub use errors::{InferenceError, Result};
pub use mock::{MockCall, MockClient};
pub use openai::{OpenAiClient, OpenAiConfig};
