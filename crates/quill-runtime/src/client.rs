//! Template-aware completion client.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use quill_llm::{CompletionOptions, InferenceClient};
use quill_prompts::{Placeholders, PromptStore, placeholder_names, render};
use tracing::{debug, instrument};

use crate::errors::Result;

/// Binds a [`PromptStore`] to an [`InferenceClient`] with default sampling options.
#[derive(Clone)]
pub struct PromptClient {
    inference: Arc<dyn InferenceClient>,
    store: PromptStore,
    options: CompletionOptions,
}

impl PromptClient {
    /// Client with default [`CompletionOptions`].
    pub fn new(inference: Arc<dyn InferenceClient>, store: PromptStore) -> Self {
        Self {
            inference,
            store,
            options: CompletionOptions::default(),
        }
    }

    /// Replace the default sampling options.
    #[must_use]
    pub fn with_options(mut self, options: CompletionOptions) -> Self {
        self.options = options;
        self
    }

    /// Default sampling options.
    pub fn options(&self) -> &CompletionOptions {
        &self.options
    }

    /// Model used for completions.
    pub fn model(&self) -> &str {
        self.inference.model()
    }

    /// Underlying template store.
    pub fn store(&self) -> &PromptStore {
        &self.store
    }

    /// Every template identifier and its file.
    pub fn list_templates(&self) -> Result<BTreeMap<String, PathBuf>> {
        Ok(self.store.list()?)
    }

    /// Whether `identifier` is a known template.
    pub fn has_template(&self, identifier: &str) -> Result<bool> {
        Ok(self.store.contains(identifier)?)
    }

    /// Raw template text.
    pub fn load_template(&self, identifier: &str) -> Result<String> {
        Ok(self.store.load(identifier)?)
    }

    /// Load `identifier` and substitute `values`.
    pub fn build_prompt(&self, identifier: &str, values: &Placeholders) -> Result<String> {
        let template = self.store.load(identifier)?;
        let unresolved: Vec<String> = placeholder_names(&template)
            .into_iter()
            .filter(|name| !values.contains(name))
            .collect();
        if !unresolved.is_empty() {
            debug!(prompt = identifier, ?unresolved, "placeholders left unresolved");
        }
        Ok(render(&template, values))
    }

    /// Complete `prompt` with the default options.
    pub async fn complete(&self, prompt: &str) -> Result<String> {
        self.complete_with(prompt, &self.options).await
    }

    /// Complete `prompt` with explicit options.
    pub async fn complete_with(&self, prompt: &str, options: &CompletionOptions) -> Result<String> {
        Ok(self.inference.complete(prompt, options).await?)
    }

    /// Render `identifier` with `values` and complete it.
    #[instrument(skip(self, values), fields(model = %self.inference.model()))]
    pub async fn complete_template(&self, identifier: &str, values: &Placeholders) -> Result<String> {
        let prompt = self.build_prompt(identifier, values)?;
        debug!(prompt_len = prompt.len(), "prompt rendered");
        self.complete(&prompt).await
    }
}
