//! Note metadata components

use maud::{Markup, html};

use crate::notes::NoteMetadata;
use crate::util::format_date;

/// Renders note header with title, description, date and cover image
///
/// Optional fields are omitted entirely when absent. The cover image is
/// used as given in the front matter.
///
/// # Arguments
///
/// * `meta`: Metadata of the note being displayed
///
/// # Returns
///
/// Note header markup
pub fn note_header(meta: &NoteMetadata) -> Markup {
    html! {
        header class="note-header" {
            h1 class="note-title" { (meta.title) }
            @if let Some(description) = &meta.description {
                p class="note-description" { (description) }
            }
            @if let Some(date) = &meta.date {
                time class="note-date" datetime=(date) { (format_date(date)) }
            }
            (tag_list(meta.tags()))
            @if let Some(cover) = &meta.cover_image {
                div class="note-cover" {
                    img src=(cover) alt=(meta.title) loading="lazy";
                }
            }
        }
    }
}

/// Renders tags as a list of badges, nothing when there are none
pub fn tag_list(tags: &[String]) -> Markup {
    html! {
        @if !tags.is_empty() {
            ul class="tag-list" {
                @for tag in tags {
                    li class="tag" { "#" (tag) }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta() -> NoteMetadata {
        NoteMetadata {
            title: "Getting started".to_string(),
            description: Some("First steps".to_string()),
            date: Some("2023-01-15".to_string()),
            tags: Some(vec!["obsidian".to_string(), "tutorial".to_string()]),
            slug: "getting-started".to_string(),
            is_public: true,
            cover_image: Some("https://example.com/cover.jpg".to_string()),
        }
    }

    #[test]
    fn test_note_header_full() {
        // Act
        let html = note_header(&meta()).into_string();

        // Assert
        assert!(html.contains("<h1 class=\"note-title\">Getting started</h1>"));
        assert!(html.contains("First steps"));
        assert!(html.contains("15 January 2023"), "Date should be formatted");
        assert!(html.contains("#obsidian"));
        assert!(html.contains("src=\"https://example.com/cover.jpg\""));
    }

    #[test]
    fn test_note_header_minimal() {
        // Arrange
        let meta = NoteMetadata {
            description: None,
            date: None,
            tags: None,
            cover_image: None,
            ..meta()
        };

        // Act
        let html = note_header(&meta).into_string();

        // Assert
        assert!(!html.contains("note-description"));
        assert!(!html.contains("<time"));
        assert!(!html.contains("tag-list"));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn test_empty_tag_list_renders_nothing() {
        assert_eq!(tag_list(&[]).into_string(), "");
    }
}
