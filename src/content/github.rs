//! GitHub contents API client.
//!
//! Files are read through `GET /repos/{owner}/{repo}/contents/{path}`. The
//! JSON media type returns a base64 envelope for files and an array for
//! directories; the raw media type returns file bytes directly.
//!
//! Authentication is optional: without a token public repositories are still
//! readable, subject to GitHub's anonymous rate limit.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use tracing::debug;

use super::types::{
    ContentHost, ContentResponse, DirectoryEntry, EntryKind, FetchError, FileContent, RemoteFile,
};
use crate::path::encode_segments;

/// Default GitHub API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// User-Agent header value for API requests.
const USER_AGENT_VALUE: &str = concat!("vaultpress/", env!("CARGO_PKG_VERSION"));

/// Media type for JSON envelopes.
const JSON_MEDIA_TYPE: &str = "application/vnd.github+json";

/// Media type for raw file bytes.
const RAW_MEDIA_TYPE: &str = "application/vnd.github.raw+json";

/// GitHub contents API client.
///
/// Cheap to clone; holds no per request state.
#[derive(Clone)]
pub struct GitHubClient {
    /// HTTP client for making requests
    client: Client,
    /// Personal access token, if configured
    token: Option<String>,
    /// API base URL (configurable for GitHub Enterprise and tests)
    api_base: String,
}

// Custom Debug to avoid exposing token
impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("has_token", &self.token.is_some())
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl GitHubClient {
    /// Creates client against the public GitHub API.
    ///
    /// # Arguments
    ///
    /// * `token`: Optional personal access token
    pub fn new(token: Option<String>) -> Self {
        Self::with_api_base(token, DEFAULT_API_BASE)
    }

    /// Creates client against a custom API base URL.
    ///
    /// # Arguments
    ///
    /// * `token`: Optional personal access token
    /// * `api_base`: API root such as `https://github.example.com/api/v3`
    pub fn with_api_base(token: Option<String>, api_base: impl Into<String>) -> Self {
        let api_base = api_base.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            token: token.filter(|t| !t.trim().is_empty()),
            api_base,
        }
    }

    /// Returns whether requests are authenticated.
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Returns configured API base URL.
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Builds contents endpoint URL for a file.
    fn contents_url(&self, file: RemoteFile<'_>) -> String {
        let path = file.path.trim_matches('/');
        if path.is_empty() {
            format!(
                "{}/repos/{}/{}/contents",
                self.api_base, file.owner, file.repo
            )
        } else {
            format!(
                "{}/repos/{}/{}/contents/{}",
                self.api_base,
                file.owner,
                file.repo,
                encode_segments(path)
            )
        }
    }

    /// Builds common headers for API requests.
    fn headers(&self, media_type: &'static str) -> Result<HeaderMap, FetchError> {
        let mut headers = HeaderMap::new();
        if let Some(token) = &self.token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| FetchError::AuthFailed {
                    status: StatusCode::UNAUTHORIZED.as_u16(),
                    message: "Token contains invalid characters".into(),
                })?;
            headers.insert(AUTHORIZATION, value);
        }
        headers.insert(ACCEPT, HeaderValue::from_static(media_type));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static("2022-11-28"),
        );
        Ok(headers)
    }

    /// Sends GET request, mapping unsuccessful statuses to errors.
    async fn get(
        &self,
        file: RemoteFile<'_>,
        media_type: &'static str,
    ) -> Result<Response, FetchError> {
        let url = self.contents_url(file);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .headers(self.headers(media_type)?)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(Self::error_from_response(response, status, file).await)
        }
    }

    /// Maps an error response to a [`FetchError`].
    async fn error_from_response(
        response: Response,
        status: StatusCode,
        file: RemoteFile<'_>,
    ) -> FetchError {
        let rate_limit_exhausted = response
            .headers()
            .get("x-ratelimit-remaining")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.trim() == "0");

        let message = match response.json::<GitHubErrorResponse>().await {
            Ok(err) => err.message,
            Err(_) => "Unknown error".to_string(),
        };

        match status {
            StatusCode::NOT_FOUND => FetchError::NotFound(file.to_string()),
            StatusCode::UNAUTHORIZED => FetchError::AuthFailed {
                status: status.as_u16(),
                message: "Invalid or expired token".into(),
            },
            StatusCode::FORBIDDEN if rate_limit_exhausted => FetchError::RateLimited {
                status: status.as_u16(),
            },
            StatusCode::FORBIDDEN => FetchError::AuthFailed {
                status: status.as_u16(),
                message: format!("Permission denied: {}", message),
            },
            StatusCode::TOO_MANY_REQUESTS => FetchError::RateLimited {
                status: status.as_u16(),
            },
            _ if status.is_server_error() => FetchError::Api {
                status: status.as_u16(),
                message: format!("GitHub server error: {}", message),
            },
            _ => FetchError::Api {
                status: status.as_u16(),
                message,
            },
        }
    }
}

#[async_trait]
impl ContentHost for GitHubClient {
    fn name(&self) -> &'static str {
        "github"
    }

    async fn fetch(&self, file: RemoteFile<'_>) -> Result<ContentResponse, FetchError> {
        let response = self.get(file, JSON_MEDIA_TYPE).await?;
        let payload: GitHubContents = response
            .json()
            .await
            .map_err(|e| FetchError::Malformed(format!("Failed to parse response: {}", e)))?;

        match payload {
            // Files over 1 MB come without inline content
            GitHubContents::Single(entry) if entry.is_truncated() => {
                debug!("{} has no inline content, fetching raw", entry.path);
                let bytes = self.fetch_raw(file).await?;
                Ok(ContentResponse::File(FileContent {
                    name: entry.name,
                    path: entry.path,
                    bytes,
                }))
            }
            payload => payload.into_response(),
        }
    }

    async fn fetch_raw(&self, file: RemoteFile<'_>) -> Result<Vec<u8>, FetchError> {
        let response = self.get(file, RAW_MEDIA_TYPE).await?;
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.contains("json"));
        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        // Directories ignore the raw media type and answer with a listing
        if is_json && serde_json::from_slice::<Vec<GitHubEntry>>(&bytes).is_ok() {
            return Err(FetchError::NotAFile(file.to_string()));
        }
        Ok(bytes.to_vec())
    }

    async fn probe(&self, file: RemoteFile<'_>) -> Result<(), FetchError> {
        // Body is dropped unread
        self.get(file, JSON_MEDIA_TYPE).await.map(|_| ())
    }
}

/// GitHub error response format.
#[derive(Deserialize)]
struct GitHubErrorResponse {
    message: String,
}

/// Contents endpoint payload: an object for files, an array for directories.
#[derive(Deserialize)]
#[serde(untagged)]
enum GitHubContents {
    Listing(Vec<GitHubEntry>),
    Single(GitHubEntry),
}

/// Contents endpoint item.
#[derive(Deserialize)]
struct GitHubEntry {
    #[serde(rename = "type")]
    kind: String,
    name: String,
    path: String,
    /// Present on single file responses only
    content: Option<String>,
    encoding: Option<String>,
}

impl GitHubContents {
    /// Converts payload into a tagged response.
    fn into_response(self) -> Result<ContentResponse, FetchError> {
        match self {
            Self::Listing(entries) => Ok(ContentResponse::Directory(
                entries
                    .into_iter()
                    .map(|entry| DirectoryEntry {
                        kind: entry_kind(&entry.kind),
                        name: entry.name,
                        path: entry.path,
                    })
                    .collect(),
            )),
            Self::Single(entry) => {
                if entry.kind != "file" {
                    return Err(FetchError::NotAFile(entry.path));
                }
                let bytes = decode_envelope(&entry)?;
                Ok(ContentResponse::File(FileContent {
                    name: entry.name,
                    path: entry.path,
                    bytes,
                }))
            }
        }
    }
}

impl GitHubEntry {
    /// Whether the file envelope omits content the host did not inline.
    fn is_truncated(&self) -> bool {
        self.kind == "file"
            && self.encoding.as_deref() == Some("none")
            && self.content.as_deref().is_none_or(str::is_empty)
    }
}

fn entry_kind(kind: &str) -> EntryKind {
    match kind {
        "file" => EntryKind::File,
        "dir" => EntryKind::Dir,
        _ => EntryKind::Other,
    }
}

/// Decodes file envelope content.
///
/// GitHub wraps base64 content at 60 columns, so whitespace is stripped
/// before decoding.
fn decode_envelope(entry: &GitHubEntry) -> Result<Vec<u8>, FetchError> {
    let content = entry
        .content
        .as_deref()
        .ok_or_else(|| FetchError::Malformed(format!("File has no content: {}", entry.path)))?;

    match entry.encoding.as_deref() {
        Some("base64") => {
            let compact: String = content.chars().filter(|c| !c.is_whitespace()).collect();
            STANDARD
                .decode(compact)
                .map_err(|e| FetchError::Decode(format!("{}: {}", entry.path, e)))
        }
        Some("none") if content.is_empty() => Err(FetchError::Malformed(format!(
            "File content not inlined: {}",
            entry.path
        ))),
        Some("none") | Some("") | None => Ok(content.as_bytes().to_vec()),
        Some(other) => Err(FetchError::Malformed(format!(
            "Unsupported encoding '{}' for {}",
            other, entry.path
        ))),
    }
}
