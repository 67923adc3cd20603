//! Index and note page handlers.

use anyhow::{Context, Result};
use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use maud::Markup;
use tracing::{debug, warn};

use crate::pages;
use crate::server::AppState;

pub fn note_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/notes/{slug}", get(note))
}

async fn index(State(state): State<AppState>) -> Html<String> {
    let notes = state.store.list_notes().await.unwrap_or_else(|e| {
        warn!("Error fetching notes: {}", e);
        Vec::new()
    });

    Html(pages::index::generate(&state.site(), &notes).into_string())
}

async fn note(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    if !state.store.exists(&slug).await {
        debug!("Note not found: {}", slug);
        return not_found(State(state)).await;
    }

    match render_note(&state, &slug).await {
        Ok(markup) => Html(markup.into_string()).into_response(),
        Err(e) => {
            warn!("Failed to render note {}: {:#}", slug, e);
            not_found(State(state)).await
        }
    }
}

async fn render_note(state: &AppState, slug: &str) -> Result<Markup> {
    let note = state
        .store
        .fetch_note(slug)
        .await
        .with_context(|| format!("Failed to fetch note: {}", slug))?;

    let html = state
        .renderer
        .render(&note.content)
        .with_context(|| format!("Failed to render markdown for note: {}", slug))?;

    Ok(pages::note::generate(&state.site(), &note.metadata, &html))
}

/// Responds with the not found page and status 404.
pub async fn not_found(State(state): State<AppState>) -> Response {
    (
        StatusCode::NOT_FOUND,
        Html(pages::not_found::generate(&state.site()).into_string()),
    )
        .into_response()
}
