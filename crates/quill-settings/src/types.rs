//! Settings type definitions.
//!
//! All types use `#[serde(rename_all = "camelCase", default)]` so a partial
//! settings file deserializes with compiled defaults filling the gaps.

use std::fmt;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Root settings type for Quill.
///
/// Loaded from `~/.quill/settings.json` with defaults applied for missing
/// fields. Environment variables can override specific values.
///
/// ```json
/// {
///   "inference": { "model": "gpt-4o-mini", "temperature": 0.7 },
///   "vault": { "dir": "/home/me/notes" }
/// }
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuillSettings {
    /// Chat-completions endpoint and sampling defaults.
    pub inference: InferenceSettings,
    /// Prompt template directory.
    pub prompts: PromptSettings,
    /// Markdown notes directory.
    pub vault: VaultSettings,
    /// `yt-dlp` integration.
    pub media: MediaSettings,
    /// Article generator defaults.
    pub generator: GeneratorSettings,
    /// Logging configuration.
    pub logging: LoggingSettings,
}

/// Inference endpoint settings.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InferenceSettings {
    /// Base URL of an OpenAI-compatible API (without `/chat/completions`).
    pub base_url: String,
    /// Model identifier sent with every request.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f64,
    /// Nucleus sampling mass.
    pub top_p: f64,
    /// Frequency penalty.
    pub frequency_penalty: f64,
    /// Presence penalty.
    pub presence_penalty: f64,
    /// Optional completion length cap.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Optional whole-request HTTP timeout in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_timeout_secs: Option<u64>,
    /// API key. Read from the environment only.
    #[serde(skip)]
    pub api_key: Option<SecretString>,
}

impl Default for InferenceSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o".to_string(),
            temperature: 1.0,
            top_p: 1.0,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
            max_tokens: None,
            http_timeout_secs: None,
            api_key: None,
        }
    }
}

impl fmt::Debug for InferenceSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InferenceSettings")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("top_p", &self.top_p)
            .field("frequency_penalty", &self.frequency_penalty)
            .field("presence_penalty", &self.presence_penalty)
            .field("max_tokens", &self.max_tokens)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Prompt template directory settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PromptSettings {
    /// Directory holding the template files.
    pub dir: String,
    /// File suffix (without the dot) that marks a template.
    pub suffix: String,
}

impl Default for PromptSettings {
    fn default() -> Self {
        Self {
            dir: "prompts".to_string(),
            suffix: "prompt".to_string(),
        }
    }
}

/// Notes directory settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VaultSettings {
    /// Directory holding the markdown notes.
    pub dir: String,
}

impl Default for VaultSettings {
    fn default() -> Self {
        Self {
            dir: ".".to_string(),
        }
    }
}

/// `yt-dlp` settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MediaSettings {
    /// Executable name or path.
    pub ytdlp_path: String,
    /// Subtitle language requested for transcripts.
    pub sub_lang: String,
    /// Per-invocation timeout in seconds; `None` waits indefinitely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for MediaSettings {
    fn default() -> Self {
        Self {
            ytdlp_path: "yt-dlp".to_string(),
            sub_lang: "en".to_string(),
            timeout_secs: Some(300),
        }
    }
}

/// Article generator defaults.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorSettings {
    /// Role preamble substituted for `<<PERSONALITY>>`.
    pub personality: String,
    /// Template used by `modify` when none is given.
    pub modify_template: String,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            personality: "You're a professional writer with a deep knowledge of Javascript"
                .to_string(),
            modify_template: "ARTICLE_GENERATOR_MODIFY_BLOCK".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingSettings {
    /// Default filter directive; `RUST_LOG` takes precedence.
    pub level: String,
    /// Emit JSON lines instead of compact text.
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
