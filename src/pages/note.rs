//! Note page rendering

use maud::{Markup, PreEscaped, html};

use crate::components::Site;
use crate::components::layout::page_wrapper;
use crate::components::metadata::note_header;
use crate::components::nav::site_header;
use crate::notes::NoteMetadata;

/// Renders a note page around already rendered note HTML
///
/// The document title is `"{title} | {site}"` and the meta description is
/// the note description when it has one.
///
/// # Arguments
///
/// * `site`: Site identity
/// * `meta`: Metadata of the note
/// * `rendered_html`: Note body rendered by the markdown renderer
///
/// # Returns
///
/// Complete HTML markup for the note page
pub fn generate(site: &Site<'_>, meta: &NoteMetadata, rendered_html: &str) -> Markup {
    page_wrapper(
        site,
        Some(&meta.title),
        meta.description.as_deref(),
        &["/assets/note.css", "/assets/markdown.css"],
        html! {
            (site_header(site.name, Some(&meta.title)))
            article class="note" {
                (note_header(meta))
                div class="markdown-content" {
                    (PreEscaped(rendered_html))
                }
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::layout::DEFAULT_DESCRIPTION;

    const SITE: Site<'static> = Site {
        name: "ObsidianNotes",
        owner: "frechezz",
    };

    fn meta(description: Option<&str>) -> NoteMetadata {
        NoteMetadata {
            title: "Markdown syntax".to_string(),
            description: description.map(String::from),
            date: Some("2023-02-20".to_string()),
            tags: Some(vec!["markdown".to_string()]),
            slug: "markdown-syntax".to_string(),
            is_public: true,
            cover_image: None,
        }
    }

    #[test]
    fn test_note_page_title_and_body() {
        // Arrange
        let body = "<p>Rendered <strong>body</strong></p>";

        // Act
        let html = generate(&SITE, &meta(Some("All the syntax")), body).into_string();

        // Assert
        assert!(html.contains("<title>Markdown syntax | ObsidianNotes</title>"));
        assert!(html.contains("content=\"All the syntax\""));
        assert!(html.contains(body), "Body should not be escaped");
        assert!(html.contains("20 February 2023"));
        assert!(html.contains("/assets/markdown.css"));
    }

    #[test]
    fn test_note_page_default_description() {
        let html = generate(&SITE, &meta(None), "").into_string();

        assert!(html.contains(&format!("content=\"{}\"", DEFAULT_DESCRIPTION)));
    }
}
