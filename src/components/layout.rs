//! Page layout wrapper component

use maud::{DOCTYPE, Markup, html};

use super::footer::footer;

/// Meta description used when a page has none of its own.
pub const DEFAULT_DESCRIPTION: &str = "A note from Obsidian";

/// Site identity shared by every page
#[derive(Debug, Clone, Copy)]
pub struct Site<'a> {
    /// Site name shown in titles, header and footer
    pub name: &'a str,
    /// GitHub account credited in the footer
    pub owner: &'a str,
}

/// Builds the document title for a page.
///
/// Pages with their own title read `"{title} | {site}"`; the landing page
/// uses the bare site name.
pub fn document_title(site: &Site<'_>, title: Option<&str>) -> String {
    match title {
        Some(title) => format!("{} | {}", title, site.name),
        None => site.name.to_string(),
    }
}

/// Wraps page content with standard HTML structure
///
/// Provides consistent DOCTYPE, html, head, and container structure across
/// all page types. The wrapper handles viewport configuration, charset,
/// description and stylesheet loading while the caller provides page
/// specific body content.
///
/// # Arguments
///
/// * `site`: Site identity for title suffix and footer
/// * `title`: Page title text (without suffix), `None` for the landing page
/// * `description`: Meta description, defaults to [`DEFAULT_DESCRIPTION`]
/// * `stylesheets`: Array of CSS file paths to include
/// * `body`: Page-specific body markup
///
/// # Returns
///
/// Complete HTML document with wrapped content
pub fn page_wrapper(
    site: &Site<'_>,
    title: Option<&str>,
    description: Option<&str>,
    stylesheets: &[&str],
    body: Markup,
) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                meta name="description" content=(description.unwrap_or(DEFAULT_DESCRIPTION));
                title { (document_title(site, title)) }
                @for stylesheet in stylesheets {
                    link rel="stylesheet" href=(stylesheet);
                }
            }
            body {
                div class="container" {
                    (body)
                }
                (footer(site))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SITE: Site<'static> = Site {
        name: "ObsidianNotes",
        owner: "frechezz",
    };

    #[test]
    fn test_document_title_with_page_title() {
        assert_eq!(
            document_title(&SITE, Some("Markdown syntax")),
            "Markdown syntax | ObsidianNotes"
        );
    }

    #[test]
    fn test_document_title_landing_page() {
        assert_eq!(document_title(&SITE, None), "ObsidianNotes");
    }

    #[test]
    fn test_page_wrapper_structure() {
        // Arrange
        let body = html! { p { "Hello" } };

        // Act
        let html = page_wrapper(&SITE, Some("Intro"), None, &["/assets/note.css"], body)
            .into_string();

        // Assert
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Intro | ObsidianNotes</title>"));
        assert!(html.contains(&format!("content=\"{}\"", DEFAULT_DESCRIPTION)));
        assert!(html.contains("href=\"/assets/note.css\""));
        assert!(html.contains("<p>Hello</p>"));
        assert!(html.contains("<footer"), "Should include footer");
    }

    #[test]
    fn test_page_wrapper_escapes_title() {
        let html = page_wrapper(&SITE, Some("<script>"), Some("a \"quoted\" note"), &[], html! {})
            .into_string();

        assert!(!html.contains("<title><script>"));
        assert!(html.contains("&lt;script&gt; | ObsidianNotes"));
        assert!(html.contains("a &quot;quoted&quot; note"));
    }
}
