//! Note metadata and content types.

use crate::frontmatter::Document;

/// Metadata describing a note, read from its front matter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteMetadata {
    /// Display title (falls back to the slug)
    pub title: String,
    /// Short summary
    pub description: Option<String>,
    /// Publication date as written in the front matter
    pub date: Option<String>,
    /// Tags in front matter order
    pub tags: Option<Vec<String>>,
    /// Identifier derived from the file name
    pub slug: String,
    /// Whether the note is listed on the index page
    pub is_public: bool,
    /// Cover image URL
    pub cover_image: Option<String>,
}

impl NoteMetadata {
    /// Builds metadata from a parsed document.
    ///
    /// Front matter keys follow the Obsidian vault convention (`isPublic`,
    /// `coverImage`). Missing `isPublic` means private; a missing or empty
    /// `title` falls back to the slug.
    ///
    /// # Arguments
    ///
    /// * `document`: Parsed note document
    /// * `slug`: Slug derived from the note file name
    pub fn from_front_matter(document: &Document, slug: impl Into<String>) -> Self {
        let slug = slug.into();
        let title = document
            .text_field("title")
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| slug.clone());

        Self {
            title,
            description: document.text_field("description"),
            date: document.text_field("date"),
            tags: document.list_field("tags"),
            slug,
            is_public: document.bool_field("isPublic").unwrap_or(false),
            cover_image: document.str_field("coverImage").map(String::from),
        }
    }

    /// Tags as a slice, empty when the note has none.
    pub fn tags(&self) -> &[String] {
        self.tags.as_deref().unwrap_or(&[])
    }
}

/// Processed note body paired with its metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteContent {
    /// Markdown body with image references normalized
    pub content: String,
    /// Note metadata
    pub metadata: NoteMetadata,
}
