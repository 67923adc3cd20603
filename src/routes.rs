//! HTTP route handlers.

mod health;
mod image;
mod notes;

pub use health::health_routes;
pub use image::{IMAGE_CACHE_CONTROL, image_fallback_url, image_routes};
pub use notes::{not_found, note_routes};
