//! Filesystem-backed template store.
//!
//! Every regular, non-hidden file in the directory whose name ends in
//! `.<suffix>` is a template. Its identifier is the file stem with a `_`
//! inserted at each lowercase-to-uppercase boundary, upper-cased:
//! `articleGeneratorInitial.prompt` → `ARTICLE_GENERATOR_INITIAL`.
//!
//! Nothing is cached. Each call reads the directory again, so edits to
//! template files are visible immediately.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::errors::{PromptError, Result};

/// Suffix used when none is configured.
pub const DEFAULT_SUFFIX: &str = "prompt";

/// A directory of prompt templates.
#[derive(Clone, Debug)]
pub struct PromptStore {
    dir: PathBuf,
    suffix: String,
}

impl PromptStore {
    /// Store over `dir` with the default `.prompt` suffix.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            suffix: DEFAULT_SUFFIX.to_string(),
        }
    }

    /// Use a different file suffix. A leading dot is ignored.
    #[must_use]
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        let suffix = suffix.into();
        self.suffix = suffix.trim_start_matches('.').to_string();
        self
    }

    /// Template directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Template file suffix, without the dot.
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Map every template identifier to its file.
    ///
    /// Files are visited in name order. When two files normalize to the same
    /// identifier the first one is kept and the collision is logged.
    pub fn list(&self) -> Result<BTreeMap<String, PathBuf>> {
        let unavailable = |source| PromptError::DirectoryUnavailable {
            path: self.dir.clone(),
            source,
        };

        let mut files: Vec<(String, PathBuf)> = Vec::new();
        for entry in std::fs::read_dir(&self.dir).map_err(unavailable)? {
            let entry = entry.map_err(unavailable)?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if name.starts_with('.') {
                continue;
            }
            files.push((name.to_string(), path));
        }
        files.sort_by(|a, b| a.0.cmp(&b.0));

        let mut templates: BTreeMap<String, PathBuf> = BTreeMap::new();
        for (name, path) in files {
            let Some(identifier) = normalize_identifier(&name, &self.suffix) else {
                continue;
            };
            if let Some(existing) = templates.get(&identifier) {
                warn!(
                    identifier = %identifier,
                    kept = %existing.display(),
                    ignored = %path.display(),
                    "duplicate prompt identifier"
                );
                continue;
            }
            let _ = templates.insert(identifier, path);
        }

        debug!(dir = %self.dir.display(), count = templates.len(), "listed prompts");
        Ok(templates)
    }

    /// Whether `identifier` names a template in the directory.
    pub fn contains(&self, identifier: &str) -> Result<bool> {
        Ok(self.list()?.contains_key(identifier))
    }

    /// Read a template by identifier, or by file name inside the directory.
    pub fn load(&self, name: &str) -> Result<String> {
        let path = match self.list()?.remove(name) {
            Some(path) => path,
            None => self.file_in_dir(name).ok_or_else(|| PromptError::TemplateNotFound {
                name: name.to_string(),
                source: None,
            })?,
        };

        debug!(prompt = name, path = %path.display(), "loading prompt");
        std::fs::read_to_string(&path).map_err(|e| PromptError::TemplateNotFound {
            name: name.to_string(),
            source: Some(e),
        })
    }

    fn file_in_dir(&self, file_name: &str) -> Option<PathBuf> {
        if file_name.is_empty() || file_name.contains(['/', '\\']) || file_name == ".." {
            return None;
        }
        let path = self.dir.join(file_name);
        path.is_file().then_some(path)
    }
}

/// Identifier for `file_name`, or `None` when it lacks the `.<suffix>` ending.
pub fn normalize_identifier(file_name: &str, suffix: &str) -> Option<String> {
    let stem = file_name.strip_suffix(suffix)?.strip_suffix('.')?;
    if stem.is_empty() {
        return None;
    }

    let mut snake = String::with_capacity(stem.len() + 4);
    let mut prev: Option<char> = None;
    for c in stem.chars() {
        if prev.is_some_and(|p| p.is_ascii_lowercase()) && c.is_ascii_uppercase() {
            snake.push('_');
        }
        snake.push(c);
        prev = Some(c);
    }
    Some(snake.to_uppercase())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
