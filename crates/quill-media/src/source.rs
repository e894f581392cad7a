//! Video source contract.

use async_trait::async_trait;

use crate::errors::Result;
use crate::info::VideoInfo;

/// Something that can describe a video and produce its transcript.
#[async_trait]
pub trait VideoSource: Send + Sync {
    /// Structured metadata for `url`.
    async fn video_info(&self, url: &str) -> Result<VideoInfo>;

    /// Plain-text auto-generated transcript for `url`.
    async fn transcript(&self, url: &str) -> Result<String>;
}
