//! Web front-end serving Obsidian notes from a GitHub repository.

mod assets;
pub mod components;
mod config;
pub mod content;
mod error;
mod filetype;
mod frontmatter;
mod markdown;
pub mod notes;
pub mod pages;
mod path;
pub mod routes;
pub mod server;
mod util;

pub use assets::stylesheet;
pub use config::Config;
pub use content::{
    ContentHost, ContentResponse, DirectoryEntry, EntryKind, FetchError, FileContent,
    GitHubClient, MemoryContent, RemoteFile, fetch_text,
};
pub use error::WebError;
pub use filetype::{ImageFormat, content_type_for};
pub use frontmatter::{Document, parse as parse_front_matter};
pub use markdown::{
    ImageUrlResolver, MarkdownRenderer, escape_image_urls, normalize_images, rewrite_embeds,
};
pub use notes::{NoteContent, NoteMetadata, NoteStore};
pub use path::{encode_segments, note_path};
pub use server::{AppState, router, serve};
pub use util::format_date;
