//! Note retrieval from the content host.

use futures::future::join_all;
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, warn};

use super::metadata::{NoteContent, NoteMetadata};
use crate::content::{ContentHost, ContentResponse, EntryKind, FetchError, RemoteFile, fetch_text};
use crate::frontmatter;
use crate::markdown::normalize_images;
use crate::path::{note_path, slug_from_filename};

/// Notes of one vault repository.
///
/// Cheap to clone; the content host is shared.
#[derive(Clone)]
pub struct NoteStore {
    host: Arc<dyn ContentHost>,
    owner: String,
    repo: String,
    notes_dir: String,
}

impl std::fmt::Debug for NoteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoteStore")
            .field("host", &self.host.name())
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("notes_dir", &self.notes_dir)
            .finish()
    }
}

impl NoteStore {
    /// Creates store for notes under `notes_dir` of `owner/repo`.
    ///
    /// # Arguments
    ///
    /// * `host`: Content host serving the repository
    /// * `owner`: Repository owner
    /// * `repo`: Repository name
    /// * `notes_dir`: Directory holding notes (empty or `.` for the root)
    pub fn new(
        host: Arc<dyn ContentHost>,
        owner: impl Into<String>,
        repo: impl Into<String>,
        notes_dir: impl Into<String>,
    ) -> Self {
        Self {
            host,
            owner: owner.into(),
            repo: repo.into(),
            notes_dir: notes_dir.into(),
        }
    }

    /// Repository path of the note file for `slug`.
    pub fn path_for(&self, slug: &str) -> String {
        note_path(&self.notes_dir, slug)
    }

    fn remote<'a>(&'a self, path: &'a str) -> RemoteFile<'a> {
        RemoteFile::new(&self.owner, &self.repo, path)
    }

    /// Checks whether a note file exists for `slug`.
    ///
    /// Any failure, not only a missing file, counts as absent.
    pub async fn exists(&self, slug: &str) -> bool {
        let path = self.path_for(slug);
        match self.host.probe(self.remote(&path)).await {
            Ok(()) => true,
            Err(e) => {
                debug!("Note '{}' not available at {}: {}", slug, path, e);
                false
            }
        }
    }

    /// Fetches note `slug` and prepares its body for rendering.
    ///
    /// Splits front matter from the body and normalizes image references.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::NotFound`] when the note file does not exist,
    /// [`FetchError::NotAFile`] when its path is a directory, and any other
    /// host failure.
    pub async fn fetch_note(&self, slug: &str) -> Result<NoteContent, FetchError> {
        let path = self.path_for(slug);
        debug!("Fetching note '{}' from {}", slug, path);

        let raw = fetch_text(self.host.as_ref(), self.remote(&path)).await?;
        Ok(Self::process(&raw, slug))
    }

    /// Builds note content from a raw document.
    fn process(raw: &str, slug: &str) -> NoteContent {
        let document = frontmatter::parse(raw);
        let metadata = NoteMetadata::from_front_matter(&document, slug);
        NoteContent {
            content: normalize_images(&document.body),
            metadata,
        }
    }

    /// Lists metadata of every note in the notes directory.
    ///
    /// Note files are fetched concurrently. Notes that fail to load are
    /// logged and skipped. Results are ordered newest first, then by title.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::NotAFile`] when the notes path is a file, and
    /// any host failure while listing the directory.
    pub async fn list_notes(&self) -> Result<Vec<NoteMetadata>, FetchError> {
        let dir = self.notes_dir.trim_matches('/');
        let dir = if dir == "." { "" } else { dir };

        let entries = match self.host.fetch(self.remote(dir)).await? {
            ContentResponse::Directory(entries) => entries,
            ContentResponse::File(file) => {
                return Err(FetchError::NotAFile(format!(
                    "Notes path is not a directory: {}",
                    file.path
                )));
            }
        };

        let slugs: Vec<String> = entries
            .iter()
            .filter(|entry| entry.kind == EntryKind::File)
            .filter_map(|entry| slug_from_filename(&entry.name))
            .map(String::from)
            .collect();

        let results = join_all(slugs.iter().map(|slug| self.fetch_note(slug))).await;

        let mut notes: Vec<NoteMetadata> = slugs
            .iter()
            .zip(results)
            .filter_map(|(slug, result)| match result {
                Ok(note) => Some(note.metadata),
                Err(e) => {
                    warn!("Error fetching note {}: {}", slug, e);
                    None
                }
            })
            .collect();

        notes.sort_by(newest_first);
        Ok(notes)
    }
}

/// Orders notes by date descending; undated notes go last, ties by title.
fn newest_first(a: &NoteMetadata, b: &NoteMetadata) -> Ordering {
    match (&a.date, &b.date) {
        (Some(x), Some(y)) => y.cmp(x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then_with(|| a.title.cmp(&b.title))
}
