//! Reusable HTML components for page rendering
//!
//! Maud component functions shared across the index, note and not found
//! pages. Components handle specific UI elements with consistent styling.

pub mod footer;
pub mod layout;
pub mod metadata;
pub mod nav;
pub mod note_list;

pub use layout::Site;
