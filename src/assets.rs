//! CSS asset bundling and serving

use axum::Router;
use axum::extract::Path;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use std::sync::LazyLock;
use syntect::highlighting::ThemeSet;
use syntect::html::{ClassStyle, css_for_theme_with_class_style};
use tracing::warn;

const BASE: &str = include_str!("../assets/base.css");
const LAYOUT: &str = include_str!("../assets/components/layout.css");
const NOTE_LIST: &str = include_str!("../assets/components/note-list.css");

const INDEX_PAGE: &str = include_str!("../assets/page-index.css");
const NOTE_PAGE: &str = include_str!("../assets/page-note.css");
const MARKDOWN: &str = include_str!("../assets/markdown.css");

/// Syntax theme the code highlighting classes are generated from.
const HIGHLIGHT_THEME: &str = "InspiredGitHub";

/// Stylesheets served under `/assets/`, keyed by file name.
static STYLESHEETS: LazyLock<Vec<(&'static str, String)>> = LazyLock::new(|| {
    vec![
        ("index.css", bundle(&[BASE, LAYOUT, NOTE_LIST, INDEX_PAGE])),
        ("note.css", bundle(&[BASE, LAYOUT, NOTE_PAGE])),
        ("markdown.css", bundle(&[MARKDOWN, &highlight_css()])),
    ]
});

/// Returns bundled stylesheet by file name.
pub fn stylesheet(name: &str) -> Option<&'static str> {
    STYLESHEETS
        .iter()
        .find(|(file, _)| *file == name)
        .map(|(_, css)| css.as_str())
}

/// Routes serving the bundled stylesheets.
pub fn asset_routes<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/assets/{name}", get(serve_stylesheet))
}

async fn serve_stylesheet(Path(name): Path<String>) -> Response {
    match stylesheet(&name) {
        Some(css) => (
            [
                (header::CONTENT_TYPE, "text/css; charset=utf-8"),
                (header::CACHE_CONTROL, "public, max-age=3600"),
            ],
            css,
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, "Not Found").into_response(),
    }
}

fn bundle(parts: &[&str]) -> String {
    parts.join("\n")
}

/// CSS for the `hljs-` prefixed classes emitted by the markdown renderer.
fn highlight_css() -> String {
    let themes = ThemeSet::load_defaults();
    let Some(theme) = themes.themes.get(HIGHLIGHT_THEME) else {
        warn!("Highlight theme {} is not bundled", HIGHLIGHT_THEME);
        return String::new();
    };

    css_for_theme_with_class_style(theme, ClassStyle::SpacedPrefixed { prefix: "hljs-" })
        .unwrap_or_else(|e| {
            warn!("Failed to generate highlight CSS: {}", e);
            String::new()
        })
}
