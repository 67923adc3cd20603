//! Shared test utilities for integration tests.
//!
//! Provides a mock GitHub contents API and builders for its payloads.

#![allow(dead_code)]

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Value, json};
use vaultpress::Config;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const OWNER: &str = "frechezz";
pub const NOTES_REPO: &str = "obsidianvault";
pub const IMAGES_REPO: &str = "publicobs";
pub const RAW_MEDIA_TYPE: &str = "application/vnd.github.raw+json";

/// Configuration pointing the GitHub client at `api_url`.
pub fn test_config(api_url: &str, notes_path: &str) -> Config {
    Config {
        owner: OWNER.to_string(),
        repo: NOTES_REPO.to_string(),
        token: None,
        notes_path: notes_path.to_string(),
        images_repo: IMAGES_REPO.to_string(),
        branch: "main".to_string(),
        api_url: api_url.to_string(),
        raw_url: "https://raw.githubusercontent.com".to_string(),
        host: "127.0.0.1".to_string(),
        port: 0,
        site_name: "ObsidianNotes".to_string(),
        demo: false,
    }
}

/// Contents API path of `file_path` in `repo`, as seen by the server.
pub fn contents_path(repo: &str, file_path: &str) -> String {
    format!("/repos/{}/{}/contents/{}", OWNER, repo, file_path)
}

/// File envelope as returned by the contents API.
///
/// Base64 content is wrapped at 60 columns like GitHub does.
pub fn file_json(file_path: &str, content: &[u8]) -> Value {
    let encoded = STANDARD.encode(content);
    let wrapped: Vec<String> = encoded
        .as_bytes()
        .chunks(60)
        .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
        .collect();
    let name = file_path.rsplit('/').next().unwrap_or(file_path);

    json!({
        "type": "file",
        "encoding": "base64",
        "name": name,
        "path": file_path,
        "content": format!("{}\n", wrapped.join("\n")),
    })
}

/// Directory listing with `(name, type)` entries under `dir`.
pub fn listing_json(dir: &str, entries: &[(&str, &str)]) -> Value {
    Value::Array(
        entries
            .iter()
            .map(|(name, kind)| {
                json!({
                    "type": kind,
                    "name": name,
                    "path": format!("{}/{}", dir, name),
                })
            })
            .collect(),
    )
}

/// Serves a note file through the JSON contents endpoint.
pub async fn mount_note(server: &MockServer, file_path: &str, content: &str) {
    Mock::given(method("GET"))
        .and(path(contents_path(NOTES_REPO, file_path)))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(file_json(file_path, content.as_bytes())),
        )
        .mount(server)
        .await;
}

/// Serves raw image bytes from the image repository.
pub async fn mount_image(server: &MockServer, file_path: &str, bytes: &[u8]) {
    Mock::given(method("GET"))
        .and(path(contents_path(IMAGES_REPO, file_path)))
        .and(header("accept", RAW_MEDIA_TYPE))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(bytes.to_vec()))
        .mount(server)
        .await;
}

/// Answers every request for `file_path` in `repo` with `status`.
pub async fn mount_status(server: &MockServer, repo: &str, file_path: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(contents_path(repo, file_path)))
        .respond_with(
            ResponseTemplate::new(status).set_body_json(json!({ "message": "Upstream failure" })),
        )
        .mount(server)
        .await;
}
