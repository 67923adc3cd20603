//! Not found page rendering

use maud::{Markup, html};

use crate::components::Site;
use crate::components::layout::page_wrapper;
use crate::components::nav::site_header;

/// Title of the not found page.
pub const TITLE: &str = "Note not found";

/// Renders the page shown for unknown or unavailable notes
pub fn generate(site: &Site<'_>) -> Markup {
    page_wrapper(
        site,
        Some(TITLE),
        None,
        &["/assets/index.css"],
        html! {
            (site_header(site.name, None))
            main class="not-found" {
                h1 { "404" }
                p { "The note you are looking for does not exist or is not available." }
                a href="/" class="back-link" { "Back to all notes" }
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_page() {
        // Arrange
        let site = Site {
            name: "ObsidianNotes",
            owner: "frechezz",
        };

        // Act
        let html = generate(&site).into_string();

        // Assert
        assert!(html.contains("<title>Note not found | ObsidianNotes</title>"));
        assert!(html.contains("href=\"/\""));
    }
}
