//! Site footer component

use maud::{Markup, html};

use super::layout::Site;
use crate::util::current_year;

/// Renders site footer with copyright and owner profile link
pub fn footer(site: &Site<'_>) -> Markup {
    let profile = format!("https://github.com/{}", site.owner);

    html! {
        footer class="site-footer" {
            div class="footer-brand" { (site.name) }
            div class="footer-credit" {
                "© " (current_year()) " Created by "
                a href=(profile) target="_blank" rel="noopener noreferrer" { (site.owner) }
            }
            a class="footer-github" href=(profile) target="_blank" rel="noopener noreferrer"
                aria-label="GitHub profile" { "GitHub" }
        }
    }
}
