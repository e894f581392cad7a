//! Scripted [`InferenceClient`] for tests.
//!
//! Responses are consumed in the order they were queued. Every call is
//! recorded, including calls made after the script runs out, so tests can
//! assert on the exact prompts the code under test produced.

use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::client::{CompletionOptions, InferenceClient};
use crate::errors::{InferenceError, Result};

/// One recorded call.
#[derive(Clone, Debug, PartialEq)]
pub struct MockCall {
    /// Prompt text as sent.
    pub prompt: String,
    /// Options as sent.
    pub options: CompletionOptions,
}

/// Inference client that replays queued responses.
pub struct MockClient {
    model: String,
    responses: Mutex<VecDeque<Result<String>>>,
    calls: Mutex<Vec<MockCall>>,
}

impl MockClient {
    /// Client with an empty script.
    pub fn new() -> Self {
        Self {
            model: "mock-model".to_string(),
            responses: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Client that answers with `texts` in order.
    pub fn with_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let client = Self::new();
        for text in texts {
            client.push_text(text);
        }
        client
    }

    /// Queue a successful completion.
    pub fn push_text(&self, text: impl Into<String>) {
        self.responses.lock().push_back(Ok(text.into()));
    }

    /// Queue a failure.
    pub fn push_error(&self, error: InferenceError) {
        self.responses.lock().push_back(Err(error));
    }

    /// All calls so far, oldest first.
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().clone()
    }

    /// Prompts of all calls so far, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        self.calls.lock().iter().map(|c| c.prompt.clone()).collect()
    }

    /// Number of calls so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Responses still queued.
    pub fn remaining(&self) -> usize {
        self.responses.lock().len()
    }
}

impl Default for MockClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InferenceClient for MockClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, prompt: &str, options: &CompletionOptions) -> Result<String> {
        let index = {
            let mut calls = self.calls.lock();
            calls.push(MockCall {
                prompt: prompt.to_string(),
                options: options.clone(),
            });
            calls.len() - 1
        };

        self.responses.lock().pop_front().unwrap_or_else(|| {
            Err(InferenceError::MalformedResponse {
                message: format!("mock client has no response for call {index}"),
            })
        })
    }
}
