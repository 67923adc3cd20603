//! Note listing components

use maud::{Markup, html};

use super::metadata::tag_list;
use crate::notes::NoteMetadata;
use crate::path::encode_component;
use crate::util::format_date;

/// Site path of the page for note `slug`.
pub fn note_href(slug: &str) -> String {
    format!("/notes/{}", encode_component(slug))
}

/// Wraps note cards in list container
///
/// # Arguments
///
/// * `cards`: Markup containing individual note cards
pub fn note_list(cards: Markup) -> Markup {
    html! {
        div class="note-list" {
            (cards)
        }
    }
}

/// Renders single note card linking to its page
///
/// Shows title, description, formatted date and tags.
pub fn note_card(meta: &NoteMetadata) -> Markup {
    html! {
        article class="note-card" {
            a href=(note_href(&meta.slug)) class="note-card-link" {
                h2 class="note-card-title" { (meta.title) }
            }
            @if let Some(description) = &meta.description {
                p class="note-card-description" { (description) }
            }
            div class="note-card-meta" {
                @if let Some(date) = &meta.date {
                    span class="note-card-date" { (format_date(date)) }
                }
                (tag_list(meta.tags()))
            }
        }
    }
}
