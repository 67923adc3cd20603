//! Remote repository content retrieval.
//!
//! The [`ContentHost`] trait is the seam between note handling and the
//! service holding the vault. [`GitHubClient`] talks to the GitHub contents
//! API; [`MemoryContent`] serves files from memory for demo mode and tests.
//!
//! Every call is a fresh round trip: nothing is cached and failed requests
//! are never retried.

mod github;
mod memory;
mod types;

pub use github::GitHubClient;
pub use memory::MemoryContent;
pub use types::{
    ContentHost, ContentResponse, DirectoryEntry, EntryKind, FetchError, FileContent, RemoteFile,
    fetch_text,
};
