//! Markdown notes with a metadata card.
//!
//! A rendered note is, in order: the pre-note line, the card, the body line
//! and the post-note line. Each free-text part is followed by a newline when
//! present and contributes nothing when absent.
//!
//! Card lines, in order:
//!
//! | line | rendered when |
//! |------|---------------|
//! | `**title**: …` | always (defaults to the note title) |
//! | `**author**: …` | author set |
//! | `**tags**: a, b` | at least one tag |
//! | `**categories**: a, b` | at least one category |
//! | `**pages**: [[A]], [[B]]` | at least one page |
//! | `[Link to resource](…)` | always (empty target when unset) |
//! | `![cardImage](…)` | image set |

use std::fmt;

use quill_vault::note_file_name;

/// Metadata card of a [`Note`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NoteCard {
    /// Card title. Falls back to the note title when `None`.
    pub title: Option<String>,
    /// Author or uploader.
    pub author: Option<String>,
    /// Tags in insertion order.
    pub tags: Vec<String>,
    /// Categories in insertion order.
    pub categories: Vec<String>,
    /// Cross-referenced page names, rendered as `[[name]]`.
    pub pages: Vec<String>,
    /// Resource URL.
    pub link: Option<String>,
    /// Card image URL.
    pub image: Option<String>,
}

/// An assembled note. Built with [`NoteBuilder`]; immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Note {
    title: String,
    pre_note: Option<String>,
    body: Option<String>,
    post_note: Option<String>,
    card: NoteCard,
}

impl Note {
    /// Start building a note titled `title`.
    pub fn builder(title: impl Into<String>) -> NoteBuilder {
        NoteBuilder::new(title)
    }

    /// Note title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Main body, if set.
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Metadata card.
    pub fn card(&self) -> &NoteCard {
        &self.card
    }

    /// File name the note is saved under.
    pub fn file_name(&self) -> String {
        note_file_name(&self.title)
    }

    /// Markdown text of the note.
    pub fn render(&self) -> String {
        let mut out = String::new();
        push_line(&mut out, self.pre_note.as_deref());
        self.render_card(&mut out);
        push_line(&mut out, self.body.as_deref());
        push_line(&mut out, self.post_note.as_deref());
        out
    }

    fn render_card(&self, out: &mut String) {
        let card = &self.card;
        let title = card.title.as_deref().unwrap_or(&self.title);
        out.push_str(&format!("**title**: {title}\n"));

        if let Some(author) = &card.author {
            out.push_str(&format!("**author**: {author}\n"));
        }
        if !card.tags.is_empty() {
            out.push_str(&format!("**tags**: {}\n", card.tags.join(", ")));
        }
        if !card.categories.is_empty() {
            out.push_str(&format!("**categories**: {}\n", card.categories.join(", ")));
        }
        if !card.pages.is_empty() {
            let links: Vec<String> = card.pages.iter().map(|p| format!("[[{p}]]")).collect();
            out.push_str(&format!("**pages**: {}\n", links.join(", ")));
        }

        let link = card.link.as_deref().unwrap_or_default();
        out.push_str(&format!("[Link to resource]({link})\n"));

        if let Some(image) = &card.image {
            out.push_str(&format!("![cardImage]({image})\n"));
        }
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

fn push_line(out: &mut String, text: Option<&str>) {
    if let Some(text) = text {
        out.push_str(text);
        out.push('\n');
    }
}

/// Consuming builder for [`Note`]. Each setter returns a new builder.
#[derive(Clone, Debug)]
#[must_use]
pub struct NoteBuilder {
    note: Note,
}

impl NoteBuilder {
    /// Builder for a note titled `title`.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            note: Note {
                title: title.into(),
                pre_note: None,
                body: None,
                post_note: None,
                card: NoteCard::default(),
            },
        }
    }

    /// Text placed before the card.
    pub fn pre_note(mut self, text: impl Into<String>) -> Self {
        self.note.pre_note = Some(text.into());
        self
    }

    /// Main body, placed after the card.
    pub fn body(mut self, text: impl Into<String>) -> Self {
        self.note.body = Some(text.into());
        self
    }

    /// Text placed after the body.
    pub fn post_note(mut self, text: impl Into<String>) -> Self {
        self.note.post_note = Some(text.into());
        self
    }

    /// Card title, when it should differ from the note title.
    pub fn card_title(mut self, title: impl Into<String>) -> Self {
        self.note.card.title = Some(title.into());
        self
    }

    /// Card author.
    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.note.card.author = Some(author.into());
        self
    }

    /// Append one tag.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.note.card.tags.push(tag.into());
        self
    }

    /// Append several tags.
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.note.card.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Append one category.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.note.card.categories.push(category.into());
        self
    }

    /// Append several categories.
    pub fn categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.note
            .card
            .categories
            .extend(categories.into_iter().map(Into::into));
        self
    }

    /// Append one cross-referenced page.
    pub fn page(mut self, page: impl Into<String>) -> Self {
        self.note.card.pages.push(page.into());
        self
    }

    /// Append several cross-referenced pages.
    pub fn pages<I, S>(mut self, pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.note.card.pages.extend(pages.into_iter().map(Into::into));
        self
    }

    /// Resource link.
    pub fn link(mut self, url: impl Into<String>) -> Self {
        self.note.card.link = Some(url.into());
        self
    }

    /// Card image. `None` leaves the image line out.
    pub fn image(mut self, url: Option<impl Into<String>>) -> Self {
        self.note.card.image = url.map(Into::into);
        self
    }

    /// Finish the note.
    pub fn build(self) -> Note {
        self.note
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
