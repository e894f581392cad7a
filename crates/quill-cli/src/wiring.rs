//! Builds the runtime collaborators from settings.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use quill_llm::{CompletionOptions, InferenceClient, OpenAiClient, OpenAiConfig};
use quill_media::{YtDlp, YtDlpConfig};
use quill_prompts::PromptStore;
use quill_runtime::PromptClient;
use quill_settings::QuillSettings;
use quill_vault::Vault;

pub(crate) fn completion_options(settings: &QuillSettings) -> CompletionOptions {
    let inference = &settings.inference;
    CompletionOptions {
        temperature: inference.temperature,
        top_p: inference.top_p,
        frequency_penalty: inference.frequency_penalty,
        presence_penalty: inference.presence_penalty,
        max_tokens: inference.max_tokens,
    }
}

pub(crate) fn openai_config(settings: &QuillSettings) -> OpenAiConfig {
    let inference = &settings.inference;
    let mut config = OpenAiConfig::new(inference.model.as_str())
        .with_base_url(inference.base_url.as_str());
    config.api_key.clone_from(&inference.api_key);
    if let Some(secs) = inference.http_timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    config
}

pub(crate) fn prompt_store(settings: &QuillSettings) -> PromptStore {
    PromptStore::new(settings.prompts.dir.as_str()).with_suffix(settings.prompts.suffix.as_str())
}

pub(crate) fn prompt_client(settings: &QuillSettings) -> Result<PromptClient> {
    let config = openai_config(settings);
    if config.api_key.is_none() {
        tracing::warn!("no API key configured; set OPENAI_KEY or OPENAI_API_KEY");
    }
    let inference: Arc<dyn InferenceClient> =
        Arc::new(OpenAiClient::new(config).context("failed to build inference client")?);
    Ok(PromptClient::new(inference, prompt_store(settings))
        .with_options(completion_options(settings)))
}

pub(crate) fn vault(settings: &QuillSettings) -> Vault {
    Vault::new(settings.vault.dir.as_str())
}

pub(crate) fn ytdlp_config(settings: &QuillSettings) -> YtDlpConfig {
    let media = &settings.media;
    YtDlpConfig {
        program: media.ytdlp_path.clone(),
        sub_lang: media.sub_lang.clone(),
        timeout: media.timeout_secs.map(Duration::from_secs),
    }
}

pub(crate) fn video_source(settings: &QuillSettings) -> YtDlp {
    YtDlp::new(ytdlp_config(settings))
}
