//! Content host trait and response types.

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Errors from content host operations.
///
/// Variants map to the ways a repository host can refuse or garble a
/// request. Only [`FetchError::NotFound`] carries meaning for callers
/// (fallback redirect, not found page); the rest surface as failures.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// The requested file does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Credentials were rejected or lack permission.
    #[error("authentication failed: {message}")]
    AuthFailed {
        /// HTTP status code (401 or 403)
        status: u16,
        /// Reason reported by the host
        message: String,
    },

    /// The host is throttling requests.
    #[error("rate limited")]
    RateLimited {
        /// HTTP status code (403 or 429)
        status: u16,
    },

    /// The path resolves to a directory where a file was expected, or the
    /// reverse.
    #[error("not a file: {0}")]
    NotAFile(String),

    /// The host answered with a body of unexpected shape.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// The file envelope could not be decoded.
    #[error("decode failed: {0}")]
    Decode(String),

    /// Any other unsuccessful status.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message from the host
        message: String,
    },

    /// Network or connection error.
    #[error("network error: {0}")]
    Network(String),
}

impl FetchError {
    /// HTTP status reported by the host for this failure, when known.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound(_) => Some(404),
            Self::AuthFailed { status, .. }
            | Self::RateLimited { status }
            | Self::Api { status, .. } => Some(*status),
            Self::NotAFile(_) | Self::Malformed(_) | Self::Decode(_) | Self::Network(_) => None,
        }
    }

    /// Whether the host reported the file as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// File on the content host, identified by owner, repository and path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoteFile<'a> {
    /// Repository owner (user or organization)
    pub owner: &'a str,
    /// Repository name
    pub repo: &'a str,
    /// Path relative to the repository root (empty for the root itself)
    pub path: &'a str,
}

impl<'a> RemoteFile<'a> {
    /// Creates file reference.
    pub fn new(owner: &'a str, repo: &'a str, path: &'a str) -> Self {
        Self { owner, repo, path }
    }
}

impl fmt::Display for RemoteFile<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.owner, self.repo, self.path)
    }
}

/// Decoded file returned by the contents endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileContent {
    /// File name without directories
    pub name: String,
    /// Path relative to the repository root
    pub path: String,
    /// Decoded file bytes
    pub bytes: Vec<u8>,
}

impl FileContent {
    /// File bytes as text, replacing invalid UTF-8 sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}

/// Kind of a directory listing entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Regular file
    File,
    /// Subdirectory
    Dir,
    /// Symlink, submodule or anything else
    Other,
}

/// Single entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// Entry name without directories
    pub name: String,
    /// Path relative to the repository root
    pub path: String,
    /// Entry kind
    pub kind: EntryKind,
}

/// Response of the contents endpoint.
///
/// The same endpoint answers with a file envelope or a directory listing
/// depending on what the path points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentResponse {
    /// Path names a file
    File(FileContent),
    /// Path names a directory
    Directory(Vec<DirectoryEntry>),
}

/// Service exposing repository file contents.
#[async_trait]
pub trait ContentHost: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Fetches file envelope or directory listing at `file`.
    async fn fetch(&self, file: RemoteFile<'_>) -> Result<ContentResponse, FetchError>;

    /// Fetches raw file bytes, bypassing the encoded envelope.
    async fn fetch_raw(&self, file: RemoteFile<'_>) -> Result<Vec<u8>, FetchError>;

    /// Checks that `file` exists without reading the response body.
    async fn probe(&self, file: RemoteFile<'_>) -> Result<(), FetchError>;
}

/// Fetches file at `file` as text.
///
/// # Errors
///
/// Returns [`FetchError::NotAFile`] when the path is a directory, and any
/// error from the host.
pub async fn fetch_text(host: &dyn ContentHost, file: RemoteFile<'_>) -> Result<String, FetchError> {
    match host.fetch(file).await? {
        ContentResponse::File(content) => Ok(content.text()),
        ContentResponse::Directory(_) => Err(FetchError::NotAFile(file.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mirrors_host_codes() {
        assert_eq!(FetchError::NotFound("x".into()).status(), Some(404));
        assert_eq!(FetchError::RateLimited { status: 403 }.status(), Some(403));
        assert_eq!(
            FetchError::AuthFailed {
                status: 401,
                message: "bad token".into()
            }
            .status(),
            Some(401)
        );
        assert_eq!(
            FetchError::Api {
                status: 502,
                message: "bad gateway".into()
            }
            .status(),
            Some(502)
        );
        assert_eq!(FetchError::Network("reset".into()).status(), None);
    }

    #[test]
    fn test_remote_file_display() {
        let file = RemoteFile::new("octocat", "vault", "notes/a.md");
        assert_eq!(file.to_string(), "octocat/vault/notes/a.md");
    }

    #[test]
    fn test_file_content_text_is_lossy() {
        let content = FileContent {
            name: "a.md".into(),
            path: "a.md".into(),
            bytes: vec![b'h', b'i', 0xFF],
        };
        assert_eq!(content.text(), "hi\u{FFFD}");
    }
}
