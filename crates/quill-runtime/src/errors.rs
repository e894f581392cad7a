//! Runtime error type.

use quill_core::{Classify, ErrorKind};
use quill_llm::InferenceError;
use quill_media::MediaError;
use quill_prompts::PromptError;
use quill_vault::VaultError;
use thiserror::Error;

/// Anything that can stop a generation run or an agent.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Template lookup failed.
    #[error(transparent)]
    Prompt(#[from] PromptError),

    /// Completion call failed.
    #[error(transparent)]
    Inference(#[from] InferenceError),

    /// Notes directory access failed.
    #[error(transparent)]
    Vault(#[from] VaultError),

    /// Video metadata or transcript retrieval failed.
    #[error(transparent)]
    Media(#[from] MediaError),

    /// Prompt context could not be encoded as JSON.
    #[error("failed to encode prompt context: {0}")]
    Encode(#[from] serde_json::Error),

    /// `generate` was called with no topics.
    #[error("no blocks to generate")]
    NoBlocks,

    /// A section index past the end of the article.
    #[error("section {index} out of range (article has {len} sections)")]
    SectionOutOfRange {
        /// Requested index.
        index: usize,
        /// Current number of sections.
        len: usize,
    },
}

impl Classify for RuntimeError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Prompt(e) => e.kind(),
            Self::Inference(e) => e.kind(),
            Self::Vault(e) => e.kind(),
            Self::Media(e) => e.kind(),
            Self::Encode(_) | Self::NoBlocks | Self::SectionOutOfRange { .. } => {
                ErrorKind::InvalidInput
            }
        }
    }
}

/// Result type for runtime operations.
pub type Result<T> = std::result::Result<T, RuntimeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_delegate_to_source() {
        let err: RuntimeError = PromptError::TemplateNotFound {
            name: "X".into(),
            source: None,
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err: RuntimeError = InferenceError::Auth {
            message: "m".into(),
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::Inference);

        let err: RuntimeError = MediaError::TranscriptMissing { url: "u".into() }.into();
        assert_eq!(err.kind(), ErrorKind::ExternalTool);
    }

    #[test]
    fn local_variants_are_invalid_input() {
        assert_eq!(RuntimeError::NoBlocks.kind(), ErrorKind::InvalidInput);
        let err = RuntimeError::SectionOutOfRange { index: 4, len: 2 };
        assert_eq!(err.to_string(), "section 4 out of range (article has 2 sections)");
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn transparent_display() {
        let err: RuntimeError = PromptError::TemplateNotFound {
            name: "ARTICLE_GENERATOR".into(),
            source: None,
        }
        .into();
        assert_eq!(err.to_string(), "prompt ARTICLE_GENERATOR not found");
    }
}
