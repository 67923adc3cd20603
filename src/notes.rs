//! Notes stored in the vault repository.
//!
//! [`NoteStore`] maps slugs to repository paths and runs the fetch, front
//! matter and image rewriting pipeline. Nothing is cached: every call goes
//! to the content host.

mod metadata;
mod store;

pub use metadata::{NoteContent, NoteMetadata};
pub use store::NoteStore;
