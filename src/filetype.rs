//! Image type detection for proxied files.

use std::path::Path;

/// Content type used when the extension is not a known image format.
pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Image formats served with a specific content type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// Portable Network Graphics with transparency
    Png,
    /// JPEG compressed image (no transparency)
    Jpeg,
    /// Graphics Interchange Format with animation support
    Gif,
    /// Scalable Vector Graphics (XML based)
    Svg,
    /// WebP format with transparency and animation
    Webp,
}

impl ImageFormat {
    /// MIME type for the `Content-Type` header
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
            Self::Svg => "image/svg+xml",
            Self::Webp => "image/webp",
        }
    }

    /// Detects image format by file extension, case insensitively.
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_lowercase();

        match ext.as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "gif" => Some(Self::Gif),
            "svg" => Some(Self::Svg),
            "webp" => Some(Self::Webp),
            _ => None,
        }
    }
}

/// Content type for a proxied file, derived from its extension only.
///
/// # Examples
///
/// ```
/// use vaultpress::content_type_for;
///
/// assert_eq!(content_type_for("files/diagram.PNG"), "image/png");
/// assert_eq!(content_type_for("files/archive.zip"), "application/octet-stream");
/// ```
pub fn content_type_for(path: &str) -> &'static str {
    ImageFormat::from_path(path)
        .map(|format| format.mime_type())
        .unwrap_or(FALLBACK_CONTENT_TYPE)
}
