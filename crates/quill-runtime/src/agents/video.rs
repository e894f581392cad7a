use std::sync::Arc;

use quill_media::VideoSource;
use quill_prompts::Placeholders;
use quill_vault::{Vault, note_file_name};
use tracing::{debug, info, instrument};

use super::SavedNote;
use crate::client::PromptClient;
use crate::errors::Result;
use crate::note::NoteBuilder;

/// Template for a video summary note.
pub const VIDEO_NOTE_TEMPLATE: &str = "VIDEO_NOTE";

/// Input for [`VideoNoteAgent::run`].
#[derive(Clone, Debug, Default)]
pub struct VideoNoteRequest {
    /// Video page URL.
    pub url: String,
    /// Pages to cross-reference on the card.
    pub pages: Vec<String>,
}

/// Summarizes a video into a note, using its metadata and transcript.
#[derive(Clone)]
pub struct VideoNoteAgent {
    client: PromptClient,
    vault: Vault,
    source: Arc<dyn VideoSource>,
}

impl VideoNoteAgent {
    /// Agent writing into `vault`, reading videos from `source`.
    pub fn new(client: PromptClient, vault: Vault, source: Arc<dyn VideoSource>) -> Self {
        Self {
            client,
            vault,
            source,
        }
    }

    /// Fetch, summarize, save and return the note.
    #[instrument(skip_all, fields(url = %request.url))]
    pub async fn run(&self, request: &VideoNoteRequest) -> Result<SavedNote> {
        let info = self.source.video_info(&request.url).await?;
        let transcript = self.source.transcript(&request.url).await?;
        debug!(
            title = %info.title,
            transcript_chars = transcript.len(),
            "video context fetched"
        );

        let file_name = note_file_name(&info.title);
        let existing = self.vault.extract_existing_pages(Some(&file_name)).await?;

        let values = Placeholders::new()
            .with("TITLE", info.title.as_str())
            .with("UPLOADER", info.uploader.as_deref().unwrap_or_default())
            .with("DESCRIPTION", info.description.as_deref().unwrap_or_default())
            .with("CHAPTERS", serde_json::to_string(&info.chapters)?)
            .with("TRANSCRIPT", transcript)
            .with("PAGES", serde_json::to_string(&existing)?);
        let body = self
            .client
            .complete_template(VIDEO_NOTE_TEMPLATE, &values)
            .await?;

        let mut builder = NoteBuilder::new(info.title.as_str())
            .body(body)
            .tags(info.tags.iter().map(String::as_str))
            .categories(info.categories.iter().map(String::as_str))
            .link(request.url.as_str())
            .image(info.thumbnail.clone())
            .pages(request.pages.iter().map(String::as_str));
        if let Some(uploader) = &info.uploader {
            builder = builder.author(uploader.as_str());
        }
        let content = builder.build().render();

        let path = self.vault.save_markdown_file(&file_name, &content).await?;
        info!(path = %path.display(), "video note written");
        Ok(SavedNote { path, content })
    }
}
