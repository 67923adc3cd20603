//! Site navigation header component

use maud::{Markup, html};

/// Renders site header with breadcrumb back to the note index
///
/// The site name always links to the index; `current` is appended as the
/// unlinked last crumb on note pages.
///
/// # Arguments
///
/// * `site_name`: Site name for the root link
/// * `current`: Title of the page being viewed, if any
pub fn site_header(site_name: &str, current: Option<&str>) -> Markup {
    html! {
        header class="site-header" {
            nav class="breadcrumb" {
                a href="/" class="breadcrumb-link" { (site_name) }
                @if let Some(current) = current {
                    span class="breadcrumb-separator" { "/" }
                    span class="breadcrumb-current" { (current) }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_on_index() {
        let html = site_header("ObsidianNotes", None).into_string();

        assert!(html.contains("href=\"/\""));
        assert!(!html.contains("breadcrumb-current"));
    }

    #[test]
    fn test_header_on_note_page() {
        let html = site_header("ObsidianNotes", Some("Markdown syntax")).into_string();

        assert!(html.contains("breadcrumb-separator"));
        assert!(html.contains("<span class=\"breadcrumb-current\">Markdown syntax</span>"));
    }
}
