//! Note index page rendering

use maud::{Markup, html};

use crate::components::Site;
use crate::components::layout::page_wrapper;
use crate::components::nav::site_header;
use crate::components::note_list::{note_card, note_list};
use crate::notes::NoteMetadata;

/// Renders the landing page listing public notes
///
/// Private notes are left out; the remaining notes keep the order they are
/// given in (newest first as returned by the note store).
///
/// # Arguments
///
/// * `site`: Site identity
/// * `notes`: Metadata of every note in the vault
///
/// # Returns
///
/// Complete HTML markup for the index page
pub fn generate(site: &Site<'_>, notes: &[NoteMetadata]) -> Markup {
    let public: Vec<&NoteMetadata> = notes.iter().filter(|n| n.is_public).collect();

    page_wrapper(
        site,
        None,
        None,
        &["/assets/index.css"],
        html! {
            (site_header(site.name, None))
            main class="index-content" {
                h1 class="index-title" { "Notes" }
                @if public.is_empty() {
                    p class="empty-state" { "No public notes yet" }
                } @else {
                    (note_list(html! {
                        @for note in &public {
                            (note_card(note))
                        }
                    }))
                }
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const SITE: Site<'static> = Site {
        name: "ObsidianNotes",
        owner: "frechezz",
    };

    fn note(slug: &str, is_public: bool) -> NoteMetadata {
        NoteMetadata {
            title: format!("Title of {}", slug),
            description: None,
            date: None,
            tags: None,
            slug: slug.to_string(),
            is_public,
            cover_image: None,
        }
    }

    #[test]
    fn test_index_lists_only_public_notes() {
        // Arrange
        let notes = vec![note("shared", true), note("secret", false)];

        // Act
        let html = generate(&SITE, &notes).into_string();

        // Assert
        assert!(html.contains("<title>ObsidianNotes</title>"));
        assert!(html.contains("href=\"/notes/shared\""));
        assert!(!html.contains("secret"), "Private note must not be listed");
    }

    #[test]
    fn test_index_keeps_given_order() {
        // Arrange
        let notes = vec![note("newer", true), note("older", true)];

        // Act
        let html = generate(&SITE, &notes).into_string();

        // Assert
        let newer = html.find("/notes/newer").expect("newer listed");
        let older = html.find("/notes/older").expect("older listed");
        assert!(newer < older);
    }

    #[test]
    fn test_index_empty_state() {
        let html = generate(&SITE, &[note("hidden", false)]).into_string();

        assert!(html.contains("No public notes yet"));
    }
}
