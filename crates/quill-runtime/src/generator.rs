//! Chained article generation.
//!
//! Topics ("blocks") are turned into sections one at a time. The first block
//! is rendered with the introduction template; every later block is rendered
//! with the continuation template plus the full article written so far, so
//! section `i` always sees the exact text of sections `0..i`.
//!
//! ```text
//! Empty ──seed──▶ Seeded ──extend──▶ Extending(1) ─ … ─▶ Complete
//! ```
//!
//! A failed completion stops the run and keeps every section already
//! written. Calling [`ArticleGenerator::generate`] again resumes with the
//! first missing section; [`ArticleGenerator::reset`] starts over.

use quill_llm::CompletionOptions;
use quill_prompts::{Placeholders, PromptError};
use tracing::{debug, info, instrument};

use crate::client::PromptClient;
use crate::document::Article;
use crate::errors::{Result, RuntimeError};

/// Template for the introduction section.
pub const INITIAL_TEMPLATE: &str = "ARTICLE_GENERATOR_INITIAL";
/// Template for each following section.
pub const CONTINUE_TEMPLATE: &str = "ARTICLE_GENERATOR";
/// Default template for regenerating one section.
pub const MODIFY_TEMPLATE: &str = "ARTICLE_GENERATOR_MODIFY_BLOCK";
/// Role preamble used when none is configured.
pub const DEFAULT_PERSONALITY: &str =
    "You're a professional writer with a deep knowledge of Javascript";

/// Progress of a generation run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GeneratorState {
    /// No sections yet.
    Empty,
    /// Introduction written, more blocks remain.
    Seeded,
    /// Sections `0..=i` written, more blocks remain.
    Extending(usize),
    /// Every block has a section.
    Complete,
}

/// Drives one [`Article`] through its blocks.
pub struct ArticleGenerator {
    client: PromptClient,
    blocks: Vec<String>,
    article: Article,
    personality: String,
}

impl ArticleGenerator {
    /// Generator for `blocks`, starting from an empty article.
    pub fn new<I, S>(client: PromptClient, blocks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            client,
            blocks: blocks.into_iter().map(Into::into).collect(),
            article: Article::new(),
            personality: DEFAULT_PERSONALITY.to_string(),
        }
    }

    /// Use a different role preamble.
    #[must_use]
    pub fn with_personality(mut self, personality: impl Into<String>) -> Self {
        self.personality = personality.into();
        self
    }

    /// Use different sampling options for every call.
    #[must_use]
    pub fn with_options(mut self, options: CompletionOptions) -> Self {
        self.client = self.client.with_options(options);
        self
    }

    /// Start from existing sections. Generation continues after them.
    #[must_use]
    pub fn with_article(mut self, article: Article) -> Self {
        self.article = article;
        self
    }

    /// Current state.
    pub fn state(&self) -> GeneratorState {
        let written = self.article.len();
        if written == 0 {
            GeneratorState::Empty
        } else if written >= self.blocks.len() {
            GeneratorState::Complete
        } else if written == 1 {
            GeneratorState::Seeded
        } else {
            GeneratorState::Extending(written - 1)
        }
    }

    /// Article so far.
    pub fn article(&self) -> &Article {
        &self.article
    }

    /// Topics, one per section.
    pub fn blocks(&self) -> &[String] {
        &self.blocks
    }

    /// Role preamble.
    pub fn personality(&self) -> &str {
        &self.personality
    }

    /// Give up the generator and keep the article.
    pub fn into_article(self) -> Article {
        self.article
    }

    /// Discard every section so the next run starts from the first block.
    pub fn reset(&mut self) {
        self.article.clear();
    }

    /// Write every missing section and return all sections.
    pub async fn generate(&mut self) -> Result<&[String]> {
        if self.blocks.is_empty() {
            return Err(RuntimeError::NoBlocks);
        }

        let start = self.article.len();
        info!(
            blocks = self.blocks.len(),
            resume_from = start,
            model = %self.client.model(),
            "generating article"
        );

        while self.state() != GeneratorState::Complete {
            let _ = self.step().await?;
        }

        info!(sections = self.article.len(), "article complete");
        Ok(self.article.sections())
    }

    /// Write the next missing section and return the new state.
    pub async fn step(&mut self) -> Result<GeneratorState> {
        if self.blocks.is_empty() {
            return Err(RuntimeError::NoBlocks);
        }
        let index = self.article.len();
        if index >= self.blocks.len() {
            return Ok(GeneratorState::Complete);
        }

        let section = if index == 0 {
            self.seed().await?
        } else {
            self.extend(index).await?
        };
        self.article.push(section);
        Ok(self.state())
    }

    #[instrument(skip(self))]
    async fn seed(&self) -> Result<String> {
        let values = Placeholders::new()
            .with("PERSONALITY", self.personality.as_str())
            .with("TOPIC", self.blocks[0].as_str());
        let section = self.client.complete_template(INITIAL_TEMPLATE, &values).await?;
        debug!(chars = section.len(), "introduction written");
        Ok(section)
    }

    #[instrument(skip(self))]
    async fn extend(&self, index: usize) -> Result<String> {
        let values = Placeholders::new()
            .with("PERSONALITY", self.personality.as_str())
            .with("TOPIC", self.blocks[index].as_str())
            .with("ARTICLE", self.article.render());
        let section = self
            .client
            .complete_template(CONTINUE_TEMPLATE, &values)
            .await?;
        debug!(chars = section.len(), "section written");
        Ok(section)
    }

    /// Regenerate section `index` with `template`, guided by `rules`.
    ///
    /// The template is checked first, then the index. Either failure leaves
    /// the article untouched, as does a failed completion.
    #[instrument(skip(self, rules))]
    pub async fn modify_section(
        &mut self,
        index: usize,
        template: &str,
        rules: &str,
    ) -> Result<&str> {
        if !self.client.has_template(template)? {
            return Err(PromptError::TemplateNotFound {
                name: template.to_string(),
                source: None,
            }
            .into());
        }
        let len = self.article.len();
        let Some(current) = self.article.section(index) else {
            return Err(RuntimeError::SectionOutOfRange { index, len });
        };

        let values = Placeholders::new()
            .with("PERSONALITY", self.personality.as_str())
            .with("ARTICLE", self.article.render())
            .with("CURRENT_BLOCK", current)
            .with("RULES", rules);
        let section = self.client.complete_template(template, &values).await?;

        let _ = self.article.replace(index, section)?;
        info!(index, "section modified");
        Ok(self.article.section(index).unwrap_or_default())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
