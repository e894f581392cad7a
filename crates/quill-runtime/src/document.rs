//! Flat multi-section article.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, RuntimeError};

/// Blank line placed between sections when rendering.
pub const SECTION_SEPARATOR: &str = "\n\n";

/// Ordered generated sections. Index 0 is the introduction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Article {
    sections: Vec<String>,
}

impl Article {
    /// Empty article.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a section.
    pub fn push(&mut self, section: impl Into<String>) {
        self.sections.push(section.into());
    }

    /// Replace section `index`, returning the previous text.
    pub fn replace(&mut self, index: usize, section: impl Into<String>) -> Result<String> {
        let len = self.sections.len();
        let slot = self
            .sections
            .get_mut(index)
            .ok_or(RuntimeError::SectionOutOfRange { index, len })?;
        Ok(std::mem::replace(slot, section.into()))
    }

    /// Section `index`, if present.
    pub fn section(&self, index: usize) -> Option<&str> {
        self.sections.get(index).map(String::as_str)
    }

    /// All sections in order.
    pub fn sections(&self) -> &[String] {
        &self.sections
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether there are no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Drop every section.
    pub fn clear(&mut self) {
        self.sections.clear();
    }

    /// Sections joined by one blank line. Empty article renders as `""`.
    pub fn render(&self) -> String {
        self.sections.join(SECTION_SEPARATOR)
    }

    /// Take the sections out.
    pub fn into_sections(self) -> Vec<String> {
        self.sections
    }
}

impl From<Vec<String>> for Article {
    fn from(sections: Vec<String>) -> Self {
        Self { sections }
    }
}

impl fmt::Display for Article {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn render_joins_with_blank_line() {
        let article = Article::from(vec!["# Title".to_string(), "Body".to_string()]);
        assert_eq!(article.render(), "# Title\n\nBody");
        assert_eq!(article.to_string(), "# Title\n\nBody");
    }

    #[test]
    fn empty_renders_empty() {
        assert_eq!(Article::new().render(), "");
    }

    #[test]
    fn replace_in_range() {
        let mut article = Article::new();
        article.push("a");
        article.push("b");
        assert_eq!(article.replace(1, "B").unwrap(), "b");
        assert_eq!(article.sections(), ["a", "B"]);
    }

    #[test]
    fn replace_out_of_range_leaves_article() {
        let mut article = Article::from(vec!["a".to_string()]);
        let err = article.replace(3, "x").unwrap_err();
        assert_matches!(err, RuntimeError::SectionOutOfRange { index: 3, len: 1 });
        assert_eq!(article.section(0), Some("a"));
    }

    #[test]
    fn clear_and_len() {
        let mut article = Article::from(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(article.len(), 2);
        article.clear();
        assert!(article.is_empty());
    }

    #[test]
    fn serializes_as_list() {
        let article = Article::from(vec!["a".to_string()]);
        assert_eq!(serde_json::to_string(&article).unwrap(), r#"["a"]"#);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn render_matches_manual_join(sections in proptest::collection::vec(".{0,24}", 0..8)) {
                let article = Article::from(sections.clone());
                let mut expected = String::new();
                for (i, s) in sections.iter().enumerate() {
                    if i > 0 {
                        expected.push_str("\n\n");
                    }
                    expected.push_str(s);
                }
                prop_assert_eq!(article.render(), expected);
            }
        }
    }
}
