use quill_prompts::Placeholders;
use quill_vault::{Vault, note_file_name};
use tracing::{info, instrument};

use super::SavedNote;
use crate::client::PromptClient;
use crate::errors::Result;
use crate::note::NoteBuilder;

/// Template for a free-standing note.
pub const REGULAR_NOTE_TEMPLATE: &str = "REGULAR_NOTE";

/// Input for [`RegularNoteAgent::run`].
#[derive(Clone, Debug, Default)]
pub struct NoteRequest {
    /// Note title and file name stem.
    pub title: String,
    /// Pages to cross-reference on the card.
    pub pages: Vec<String>,
    /// Resource link.
    pub link: Option<String>,
    /// Card image URL.
    pub image: Option<String>,
    /// Card tags.
    pub tags: Vec<String>,
    /// Existing text the model should extend.
    pub note_to_extend: Option<String>,
}

/// Writes a note from the vault's existing link graph and optional seed text.
#[derive(Clone)]
pub struct RegularNoteAgent {
    client: PromptClient,
    vault: Vault,
}

impl RegularNoteAgent {
    /// Agent writing into `vault`.
    pub fn new(client: PromptClient, vault: Vault) -> Self {
        Self { client, vault }
    }

    /// Generate, save and return the note.
    #[instrument(skip_all, fields(title = %request.title))]
    pub async fn run(&self, request: &NoteRequest) -> Result<SavedNote> {
        let file_name = note_file_name(&request.title);
        let existing = self.vault.extract_existing_pages(Some(&file_name)).await?;

        let mut values = Placeholders::new().with("PAGES", serde_json::to_string(&existing)?);
        if let Some(note) = &request.note_to_extend {
            values.insert("NOTE", note.as_str());
        }
        let body = self
            .client
            .complete_template(REGULAR_NOTE_TEMPLATE, &values)
            .await?;

        let mut builder = NoteBuilder::new(request.title.as_str())
            .body(body)
            .card_title(request.title.as_str())
            .image(request.image.clone())
            .pages(request.pages.iter().map(String::as_str))
            .tags(request.tags.iter().map(String::as_str));
        if let Some(link) = &request.link {
            builder = builder.link(link.as_str());
        }
        let content = builder.build().render();

        let path = self.vault.save_markdown_file(&file_name, &content).await?;
        info!(path = %path.display(), "regular note written");
        Ok(SavedNote { path, content })
    }
}
