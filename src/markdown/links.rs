//! Image link rewriting for Obsidian notes.
//!
//! Rewriting happens in two stages. Before rendering, [`normalize_images`]
//! turns Obsidian embeds (`![[file.png]]`) into standard Markdown images and
//! escapes whitespace in image URLs, leaving the Markdown independent of
//! any host. At render time, [`ImageUrlResolver`] turns the remaining
//! relative image paths into absolute URLs on the public image repository.

use regex::{Captures, Regex};
use std::sync::LazyLock;
use tracing::debug;

use crate::path::{ATTACHMENTS_DIR, decode_once, encode_segments, encode_uri};

/// Obsidian embed: `![[name]]`.
static EMBED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[\[(.*?)\]\]").expect("embed pattern is valid"));

/// Standard Markdown image: `![alt](url)`.
static IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[(.*?)\]\((.*?)\)").expect("image pattern is valid"));

/// URL prefixes treated as already absolute.
const ABSOLUTE_PREFIXES: &[&str] = &["http://", "https://", "data:"];

/// Rewrites Obsidian embeds into standard Markdown images.
///
/// `![[name]]` becomes `![alt](path)` where alt is the last path segment of
/// `name` and path is `name` itself when it has a directory, otherwise
/// `files/name`. The path is percent-encoded; the alt text is not. Embeds
/// with an empty name are left as written.
///
/// # Examples
///
/// ```
/// use vaultpress::rewrite_embeds;
///
/// assert_eq!(
///     rewrite_embeds("![[Pasted image.png]]"),
///     "![Pasted image.png](files/Pasted%20image.png)"
/// );
/// assert_eq!(
///     rewrite_embeds("![[diagrams/flow chart.svg]]"),
///     "![flow chart.svg](diagrams/flow%20chart.svg)"
/// );
/// ```
pub fn rewrite_embeds(markdown: &str) -> String {
    EMBED
        .replace_all(markdown, |caps: &Captures| {
            let name = &caps[1];
            if name.trim().is_empty() {
                return caps[0].to_string();
            }

            let alt = name.rsplit('/').next().unwrap_or(name);
            let path = if name.contains('/') {
                name.to_string()
            } else {
                format!("{}/{}", ATTACHMENTS_DIR, name)
            };

            debug!("Rewriting embed {} -> {}", &caps[0], path);
            format!("![{}]({})", alt, encode_uri(&path))
        })
        .into_owned()
}

/// Percent-encodes standard Markdown image URLs.
///
/// URLs already containing a `%` are treated as encoded and left alone, so
/// applying this twice gives the same result as applying it once.
///
/// # Examples
///
/// ```
/// use vaultpress::escape_image_urls;
///
/// assert_eq!(escape_image_urls("![a](my image.png)"), "![a](my%20image.png)");
/// assert_eq!(escape_image_urls("![a](my%20image.png)"), "![a](my%20image.png)");
/// ```
pub fn escape_image_urls(markdown: &str) -> String {
    IMAGE
        .replace_all(markdown, |caps: &Captures| {
            let url = &caps[2];
            if url.contains('%') {
                caps[0].to_string()
            } else {
                format!("![{}]({})", &caps[1], encode_uri(url))
            }
        })
        .into_owned()
}

/// Normalizes every image reference in a note body.
///
/// Runs [`rewrite_embeds`] then [`escape_image_urls`].
pub fn normalize_images(markdown: &str) -> String {
    escape_image_urls(&rewrite_embeds(markdown))
}

/// Resolves image paths to absolute URLs on the public image repository.
///
/// Built once from configuration and shared by every render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUrlResolver {
    base: String,
}

impl ImageUrlResolver {
    /// Creates resolver for raw files of `owner/repo` at `branch`.
    ///
    /// # Arguments
    ///
    /// * `raw_base`: Raw content host, e.g. `https://raw.githubusercontent.com`
    /// * `owner`: Image repository owner
    /// * `repo`: Image repository name
    /// * `branch`: Branch the images are served from
    pub fn new(raw_base: &str, owner: &str, repo: &str, branch: &str) -> Self {
        Self {
            base: format!(
                "{}/{}/{}/refs/heads/{}/",
                raw_base.trim_end_matches('/'),
                owner,
                repo,
                branch
            ),
        }
    }

    /// Base URL every resolved path is appended to, ending with `/`.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Resolves image path to an absolute URL.
    ///
    /// Absolute URLs are returned unchanged. Relative paths are decoded
    /// once (so already escaped paths are not escaped twice), unwrapped from
    /// a leftover `![[...]]` embed, placed under `files/` when they have no
    /// directory, then escaped segment by segment.
    ///
    /// # Examples
    ///
    /// ```
    /// use vaultpress::ImageUrlResolver;
    ///
    /// let resolver = ImageUrlResolver::new(
    ///     "https://raw.githubusercontent.com", "octocat", "images", "main",
    /// );
    /// assert_eq!(
    ///     resolver.resolve("files/Pasted%20image.png"),
    ///     "https://raw.githubusercontent.com/octocat/images/refs/heads/main/files/Pasted%20image.png"
    /// );
    /// ```
    pub fn resolve(&self, path: &str) -> String {
        if is_absolute(path) {
            return path.to_string();
        }

        let decoded = if path.contains('%') {
            decode_once(path).unwrap_or_else(|| {
                debug!("Keeping undecodable image path as is: {}", path);
                path.to_string()
            })
        } else {
            path.to_string()
        };

        let unwrapped = match EMBED.captures(&decoded) {
            Some(caps) => caps[1].to_string(),
            None => decoded,
        };

        let relative = unwrapped.trim_start_matches('/');
        let relative = if relative.contains('/') {
            relative.to_string()
        } else {
            format!("{}/{}", ATTACHMENTS_DIR, relative)
        };

        format!("{}{}", self.base, encode_segments(&relative))
    }
}

/// Whether `url` starts with a recognized absolute scheme.
pub fn is_absolute(url: &str) -> bool {
    ABSOLUTE_PREFIXES.iter().any(|prefix| url.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://raw.githubusercontent.com/frechezz/publicobs/refs/heads/main/";

    fn resolver() -> ImageUrlResolver {
        ImageUrlResolver::new(
            "https://raw.githubusercontent.com/",
            "frechezz",
            "publicobs",
            "main",
        )
    }

    #[test]
    fn test_rewrite_pasted_image_embed() {
        // Arrange
        let markdown = "Before\n\n![[Pasted image 20250301151803.png]]\n\nAfter";

        // Act
        let result = normalize_images(markdown);

        // Assert
        assert!(
            result.contains(
                "![Pasted image 20250301151803.png](files/Pasted%20image%2020250301151803.png)"
            ),
            "Should rewrite embed: {}",
            result
        );
        assert!(result.starts_with("Before"));
        assert!(result.ends_with("After"));
    }

    #[test]
    fn test_rewrite_embed_with_directory() {
        // Act
        let result = rewrite_embeds("![[assets/img/chart 1.png]]");

        // Assert
        assert_eq!(result, "![chart 1.png](assets/img/chart%201.png)");
    }

    #[test]
    fn test_rewrite_multiple_embeds_on_one_line() {
        // Act
        let result = rewrite_embeds("![[a.png]] and ![[b c.png]]");

        // Assert
        assert_eq!(
            result,
            "![a.png](files/a.png) and ![b c.png](files/b%20c.png)"
        );
    }

    #[test]
    fn test_empty_embed_is_left_literal() {
        // Act
        let result = normalize_images("broken ![[]] and ![[  ]] refs");

        // Assert
        assert_eq!(result, "broken ![[]] and ![[  ]] refs");
    }

    #[test]
    fn test_unclosed_embed_is_left_literal() {
        // Act
        let result = normalize_images("![[half open.png]\n");

        // Assert
        assert_eq!(result, "![[half open.png]\n");
    }

    #[test]
    fn test_escape_standard_image_with_spaces() {
        // Act
        let result = escape_image_urls("![Diagram](images/my diagram.png)");

        // Assert
        assert_eq!(result, "![Diagram](images/my%20diagram.png)");
    }

    #[test]
    fn test_escape_leaves_encoded_url_alone() {
        // Arrange
        let markdown = "![x](files/already%20done.png)";

        // Act
        let result = escape_image_urls(markdown);

        // Assert
        assert_eq!(result, markdown);
    }

    #[test]
    fn test_escape_is_idempotent() {
        // Arrange
        let markdown = "![a](one two.png) ![b](https://host/x y.png) ![c](ok.png)";

        // Act
        let once = escape_image_urls(markdown);
        let twice = escape_image_urls(&once);

        // Assert
        assert_eq!(once, twice);
    }

    #[test]
    fn test_escape_ignores_plain_links() {
        // Arrange
        let markdown = "[not an image](some page.md)";

        // Act
        let result = escape_image_urls(markdown);

        // Assert
        assert_eq!(result, markdown);
    }

    #[test]
    fn test_resolve_absolute_url_unchanged() {
        // Arrange
        let url = "https://images.unsplash.com/photo.jpg?w=800&fit=crop";

        // Act & Assert
        assert_eq!(resolver().resolve(url), url);
        assert_eq!(resolver().resolve("http://example.com/a b.png"), "http://example.com/a b.png");
    }

    #[test]
    fn test_resolve_bare_name_defaults_to_files() {
        assert_eq!(
            resolver().resolve("diagram.png"),
            format!("{}files/diagram.png", BASE)
        );
    }

    #[test]
    fn test_resolve_does_not_double_encode() {
        assert_eq!(
            resolver().resolve("files/Pasted%20image%2020250301151803.png"),
            format!("{}files/Pasted%20image%2020250301151803.png", BASE)
        );
    }

    #[test]
    fn test_resolve_encodes_each_segment() {
        assert_eq!(
            resolver().resolve("my dir/a#b?.png"),
            format!("{}my%20dir/a%23b%3F.png", BASE)
        );
    }

    #[test]
    fn test_resolve_unwraps_leftover_embed() {
        assert_eq!(
            resolver().resolve("![[Screen shot.png]]"),
            format!("{}files/Screen%20shot.png", BASE)
        );
    }

    #[test]
    fn test_resolve_unwraps_encoded_embed() {
        assert_eq!(
            resolver().resolve("!%5B%5Bnested/pic.png%5D%5D"),
            format!("{}nested/pic.png", BASE)
        );
    }

    #[test]
    fn test_resolve_keeps_undecodable_path() {
        // %FF is not valid UTF-8 once decoded; the original value is used
        assert_eq!(
            resolver().resolve("files/bad%FF.png"),
            format!("{}files/bad%25FF.png", BASE)
        );
    }

    #[test]
    fn test_resolve_strips_leading_slash() {
        assert_eq!(
            resolver().resolve("/files/a.png"),
            format!("{}files/a.png", BASE)
        );
    }

    #[test]
    fn test_resolver_base_trims_trailing_slash() {
        assert_eq!(resolver().base(), BASE);
    }
}
