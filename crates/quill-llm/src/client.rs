//! Completion client contract.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// Sampling parameters for one completion call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompletionOptions {
    /// Sampling temperature.
    pub temperature: f64,
    /// Nucleus sampling probability mass.
    pub top_p: f64,
    /// Penalty for token frequency.
    pub frequency_penalty: f64,
    /// Penalty for token presence.
    pub presence_penalty: f64,
    /// Completion length cap. `None` lets the endpoint decide.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            temperature: 1.0,
            top_p: 1.0,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
            max_tokens: None,
        }
    }
}

impl CompletionOptions {
    /// Set the temperature.
    #[must_use]
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the nucleus sampling mass.
    #[must_use]
    pub fn with_top_p(mut self, top_p: f64) -> Self {
        self.top_p = top_p;
        self
    }

    /// Set the completion length cap.
    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// A text-completion backend.
///
/// One call, one prompt, one completion text. Implementors must be
/// `Send + Sync` so a single client can be shared behind an `Arc`.
#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// Model identifier sent with each request.
    fn model(&self) -> &str;

    /// Send `prompt` and return the completion text.
    async fn complete(&self, prompt: &str, options: &CompletionOptions) -> Result<String>;
}
