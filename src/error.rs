//! HTTP error responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::content::FetchError;

/// Errors returned by the HTTP API routes.
#[derive(Debug, Error)]
pub enum WebError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Error fetching image: {0}")]
    Image(#[source] FetchError),
}

pub type Result<T> = std::result::Result<T, WebError>;

impl WebError {
    /// Status code sent to the client.
    ///
    /// Upstream failures mirror the status GitHub answered with; failures
    /// without one map to 500. A path naming a directory is a bad request.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::Image(FetchError::NotAFile(_)) => StatusCode::BAD_REQUEST,
            Self::Image(e) => e
                .status()
                .and_then(|code| StatusCode::from_u16(code).ok())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}
