//! Page rendering modules for different view types
//!
//! Each page module builds a complete HTML document from already fetched
//! data, using the shared components module.

pub mod index;
pub mod not_found;
pub mod note;
