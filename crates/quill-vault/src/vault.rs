//! Notes directory operations.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::{Result, VaultError};

static WIKI_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[([^\]]+)\]\]").expect("wiki link pattern is valid"));

/// A note file and the link targets it mentions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistingPage {
    /// File name inside the vault, e.g. `Entropy.md`.
    pub file: String,
    /// `[[...]]` targets in order of appearance, duplicates kept.
    pub matches: Vec<String>,
}

/// A flat directory of markdown notes.
#[derive(Clone, Debug)]
pub struct Vault {
    dir: PathBuf,
}

impl Vault {
    /// Vault rooted at `dir`. Nothing is read until a method is called.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Vault directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Names of the `*.md` files directly in the vault, sorted.
    pub async fn markdown_files(&self) -> Result<Vec<String>> {
        let mut entries = tokio::fs::read_dir(&self.dir)
            .await
            .map_err(|e| VaultError::io(&self.dir, e))?;

        let mut files = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| VaultError::io(&self.dir, e))?
        {
            let path = entry.path();
            if path.extension().is_none_or(|ext| ext != "md") {
                continue;
            }
            let is_file = tokio::fs::metadata(&path)
                .await
                .is_ok_and(|meta| meta.is_file());
            if !is_file {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                files.push(name.to_string());
            }
        }

        files.sort();
        debug!(dir = %self.dir.display(), count = files.len(), "listed markdown files");
        Ok(files)
    }

    /// Links of every note except `exclude`, in file name order.
    pub async fn extract_existing_pages(&self, exclude: Option<&str>) -> Result<Vec<ExistingPage>> {
        let mut pages = Vec::new();
        for file in self.markdown_files().await? {
            if exclude == Some(file.as_str()) {
                continue;
            }
            let content = self.read_note(&file).await?;
            let matches = extract_links(&content);
            pages.push(ExistingPage { file, matches });
        }
        Ok(pages)
    }

    /// Contents of the note `file_name`.
    pub async fn read_note(&self, file_name: &str) -> Result<String> {
        let path = self.resolve(file_name)?;
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| VaultError::io(&path, e))
    }

    /// Write `content` to `file_name`, replacing any existing file.
    pub async fn save_markdown_file(&self, file_name: &str, content: &str) -> Result<PathBuf> {
        let path = self.resolve(file_name)?;
        tokio::fs::write(&path, content)
            .await
            .map_err(|e| VaultError::io(&path, e))?;
        info!(file = file_name, bytes = content.len(), "note saved");
        Ok(path)
    }

    fn resolve(&self, file_name: &str) -> Result<PathBuf> {
        if file_name.is_empty()
            || file_name == "."
            || file_name == ".."
            || file_name.contains(['/', '\\'])
        {
            return Err(VaultError::InvalidName {
                name: file_name.to_string(),
            });
        }
        Ok(self.dir.join(file_name))
    }
}

/// Every `[[NAME]]` target in `text`, in order.
pub fn extract_links(text: &str) -> Vec<String> {
    WIKI_LINK
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// File name for a note titled `title`: path separators become `-`.
pub fn note_file_name(title: &str) -> String {
    let stem: String = title
        .trim()
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '-' } else { c })
        .collect();
    format!("{stem}.md")
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
