//! In-memory content host.
//!
//! Serves files from a map keyed by repository path. Owner and repository
//! are ignored. Used for demo mode (seeded with sample notes) and as a
//! deterministic host in tests.

use async_trait::async_trait;
use std::collections::BTreeMap;

use super::types::{
    ContentHost, ContentResponse, DirectoryEntry, EntryKind, FetchError, FileContent, RemoteFile,
};

/// Sample notes served in demo mode, as (path, content) pairs.
const DEMO_NOTES: &[(&str, &str)] = &[
    (
        "getting-started-with-obsidian.md",
        include_str!("../../assets/demo/getting-started-with-obsidian.md"),
    ),
    (
        "markdown-syntax.md",
        include_str!("../../assets/demo/markdown-syntax.md"),
    ),
    (
        "advanced-obsidian-plugins.md",
        include_str!("../../assets/demo/advanced-obsidian-plugins.md"),
    ),
];

/// Content host backed by an in-memory file map.
#[derive(Debug, Clone, Default)]
pub struct MemoryContent {
    files: BTreeMap<String, Vec<u8>>,
}

impl MemoryContent {
    /// Creates empty host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates host seeded with the bundled sample notes at the root.
    pub fn demo() -> Self {
        DEMO_NOTES
            .iter()
            .fold(Self::new(), |host, (path, content)| {
                host.with_file(*path, content.as_bytes())
            })
    }

    /// Adds file at `path`, replacing any previous content.
    pub fn with_file(mut self, path: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        let path = path.into().trim_matches('/').to_string();
        self.files.insert(path, bytes.into());
        self
    }

    /// Lists direct children of directory `dir`.
    ///
    /// Returns `None` when no file lives under `dir`.
    fn list(&self, dir: &str) -> Option<Vec<DirectoryEntry>> {
        let prefix = if dir.is_empty() {
            String::new()
        } else {
            format!("{}/", dir)
        };

        let mut entries: Vec<DirectoryEntry> = Vec::new();
        for path in self.files.keys() {
            let Some(rest) = path.strip_prefix(&prefix) else {
                continue;
            };
            let entry = match rest.split_once('/') {
                Some((sub, _)) => DirectoryEntry {
                    name: sub.to_string(),
                    path: format!("{}{}", prefix, sub),
                    kind: EntryKind::Dir,
                },
                None => DirectoryEntry {
                    name: rest.to_string(),
                    path: path.clone(),
                    kind: EntryKind::File,
                },
            };
            if !entries.iter().any(|e| e.path == entry.path) {
                entries.push(entry);
            }
        }

        if entries.is_empty() && !dir.is_empty() {
            None
        } else {
            Some(entries)
        }
    }

    fn lookup(&self, file: RemoteFile<'_>) -> Result<ContentResponse, FetchError> {
        let path = file.path.trim_matches('/');
        if let Some(bytes) = self.files.get(path) {
            let name = path.rsplit('/').next().unwrap_or(path).to_string();
            return Ok(ContentResponse::File(FileContent {
                name,
                path: path.to_string(),
                bytes: bytes.clone(),
            }));
        }

        self.list(path)
            .map(ContentResponse::Directory)
            .ok_or_else(|| FetchError::NotFound(file.to_string()))
    }
}

#[async_trait]
impl ContentHost for MemoryContent {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn fetch(&self, file: RemoteFile<'_>) -> Result<ContentResponse, FetchError> {
        self.lookup(file)
    }

    async fn fetch_raw(&self, file: RemoteFile<'_>) -> Result<Vec<u8>, FetchError> {
        match self.lookup(file)? {
            ContentResponse::File(content) => Ok(content.bytes),
            ContentResponse::Directory(_) => Err(FetchError::NotAFile(file.to_string())),
        }
    }

    async fn probe(&self, file: RemoteFile<'_>) -> Result<(), FetchError> {
        self.lookup(file).map(|_| ())
    }
}
