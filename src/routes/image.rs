//! Image proxy endpoint.
//!
//! Streams image bytes from the public image repository through the
//! contents API. Images the API does not know are redirected to the raw
//! file host, which serves files the API cannot (large files, LFS).

use axum::Router;
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::get;
use serde::Deserialize;
use tracing::debug;

use crate::config::Config;
use crate::content::RemoteFile;
use crate::error::{Result, WebError};
use crate::filetype::content_type_for;
use crate::path::encode_segments;
use crate::server::AppState;

/// Cache policy for proxied images.
pub const IMAGE_CACHE_CONTROL: &str = "public, max-age=86400";

#[derive(Debug, Deserialize)]
struct ImageQuery {
    path: Option<String>,
}

pub fn image_routes() -> Router<AppState> {
    Router::new().route("/api/image", get(image))
}

/// Raw file host URL of image `path` in the public image repository.
pub fn image_fallback_url(config: &Config, path: &str) -> String {
    format!(
        "{}{}",
        config.image_resolver().base(),
        encode_segments(path.trim_start_matches('/'))
    )
}

async fn image(
    State(state): State<AppState>,
    Query(query): Query<ImageQuery>,
) -> Result<Response> {
    let path = query
        .path
        .filter(|p| !p.is_empty())
        .ok_or_else(|| WebError::BadRequest("Path parameter is required".to_string()))?;

    let config = &state.config;
    let file = RemoteFile::new(&config.owner, &config.images_repo, path.trim_start_matches('/'));

    match state.host.fetch_raw(file).await {
        Ok(bytes) => Ok((
            [
                (header::CONTENT_TYPE, content_type_for(&path)),
                (header::CACHE_CONTROL, IMAGE_CACHE_CONTROL),
            ],
            bytes,
        )
            .into_response()),
        Err(e) if e.is_not_found() => {
            let url = image_fallback_url(config, &path);
            debug!("Image {} not in contents API, redirecting to {}", file, url);
            Ok(Redirect::temporary(&url).into_response())
        }
        Err(e) => Err(WebError::Image(e)),
    }
}
