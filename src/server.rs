//! HTTP server wiring.

use anyhow::{Context, Result};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use crate::assets::asset_routes;
use crate::components::Site;
use crate::config::Config;
use crate::content::{ContentHost, GitHubClient, MemoryContent};
use crate::markdown::MarkdownRenderer;
use crate::notes::NoteStore;
use crate::routes::{health_routes, image_routes, not_found, note_routes};

/// Shared state handed to every request handler.
///
/// Built once at start-up; read only afterwards.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub host: Arc<dyn ContentHost>,
    pub store: NoteStore,
    pub renderer: Arc<MarkdownRenderer>,
}

impl AppState {
    /// Creates state serving notes and images from `host`.
    ///
    /// In demo mode the bundled notes live at the host root, so the
    /// configured notes path is ignored.
    pub fn new(config: Config, host: Arc<dyn ContentHost>) -> Self {
        let notes_dir = if config.demo {
            String::new()
        } else {
            config.notes_path.clone()
        };
        let store = NoteStore::new(
            Arc::clone(&host),
            config.owner.clone(),
            config.repo.clone(),
            notes_dir,
        );
        let renderer = MarkdownRenderer::with_image_resolver(config.image_resolver());

        Self {
            config: Arc::new(config),
            host,
            store,
            renderer: Arc::new(renderer),
        }
    }

    /// Site identity for page templates.
    pub fn site(&self) -> Site<'_> {
        Site {
            name: &self.config.site_name,
            owner: &self.config.owner,
        }
    }
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(note_routes())
        .merge(image_routes())
        .merge(asset_routes())
        .fallback(not_found)
        .with_state(state)
        .merge(health_routes())
}

/// Content host selected by configuration.
pub fn content_host(config: &Config) -> Arc<dyn ContentHost> {
    if config.demo {
        info!("Demo mode: serving bundled sample notes");
        Arc::new(MemoryContent::demo())
    } else {
        let client = GitHubClient::with_api_base(config.token().map(String::from), &config.api_url);
        info!(
            "Serving notes from {}/{} via {} (authenticated: {})",
            config.owner,
            config.repo,
            client.api_base(),
            client.has_token()
        );
        Arc::new(client)
    }
}

/// Binds the configured address and serves requests until shutdown.
///
/// # Errors
///
/// Returns error if the address cannot be bound or the server fails.
pub async fn serve(config: Config) -> Result<()> {
    let addr = config.bind_address();
    let host = content_host(&config);
    let app = router(AppState::new(config, host));

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Listening on http://{}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
