//! Markdown rendering with GitHub Flavored Markdown support.
//!
//! This module provides markdown rendering using comrak with GFM extensions
//! (tables, strikethrough, autolinks, task lists) and rewriting of Obsidian
//! image references into URLs on the public image repository.

mod links;
mod renderer;

pub use links::{ImageUrlResolver, escape_image_urls, normalize_images, rewrite_embeds};
pub use renderer::MarkdownRenderer;
