//! Markdown rendering with GitHub Flavored Markdown support.

use anyhow::{Context, Result};
use comrak::Options;
use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use super::ImageUrlResolver;

/// Renders markdown to HTML with GitHub Flavored Markdown extensions.
///
/// Provides GFM extensions including tables, strikethrough, autolinks,
/// task lists and footnotes. Uses syntect for code block syntax
/// highlighting when language is specified. When configured with an
/// [`ImageUrlResolver`], image sources are resolved against the public image
/// repository after conversion.
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    image_resolver: Option<ImageUrlResolver>,
}

impl MarkdownRenderer {
    /// Creates renderer without image resolution.
    ///
    /// Loads syntect's default syntax definitions, so build one renderer and
    /// share it rather than creating one per page.
    pub fn new() -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            image_resolver: None,
        }
    }

    /// Creates renderer resolving image sources through `resolver`.
    ///
    /// # Arguments
    ///
    /// * `resolver`: Resolver turning relative image paths into absolute URLs
    pub fn with_image_resolver(resolver: ImageUrlResolver) -> Self {
        let mut renderer = Self::new();
        renderer.image_resolver = Some(resolver);
        renderer
    }

    /// Comrak options with GFM extensions enabled.
    ///
    /// Raw HTML in notes is passed through: notes come from the site
    /// owner's own vault.
    fn options() -> Options<'static> {
        let mut options = Options::default();

        options.extension.strikethrough = true;
        options.extension.table = true;
        options.extension.autolink = true;
        options.extension.tasklist = true;
        options.extension.footnotes = true;

        options.render.unsafe_ = true;

        options
    }

    /// Renders markdown content to HTML string.
    ///
    /// # Arguments
    ///
    /// * `content`: Markdown content to render
    ///
    /// # Returns
    ///
    /// Rendered HTML with resolved images, decorated external links and
    /// syntax highlighted code blocks
    ///
    /// # Errors
    ///
    /// Returns error if syntax highlighting fails
    pub fn render(&self, content: &str) -> Result<String> {
        let html = comrak::markdown_to_html(content, &Self::options());
        let html = self.rewrite_tags(&html);
        self.highlight_code_blocks(&html)
    }

    /// Rewrites `<img>` and `<a>` tags in generated HTML.
    ///
    /// Image sources go through the image resolver (when configured) and
    /// images load lazily. Links to absolute `http(s)` URLs open in a new
    /// tab without leaking the opener.
    fn rewrite_tags(&self, html: &str) -> String {
        let mut result = String::with_capacity(html.len());
        let mut pos = 0;

        while pos < html.len() {
            // Find next link or image tag
            let link_pos = html[pos..].find("<a ");
            let img_pos = html[pos..].find("<img ");

            let (tag_start, is_image) = match (link_pos, img_pos) {
                (Some(l), Some(i)) if l < i => (pos + l, false),
                (Some(l), None) => (pos + l, false),
                (None, Some(i)) => (pos + i, true),
                (Some(_), Some(i)) => (pos + i, true),
                (None, None) => {
                    result.push_str(&html[pos..]);
                    break;
                }
            };

            // Copy everything before this tag
            result.push_str(&html[pos..tag_start]);

            let tag_end = match html[tag_start..].find('>') {
                Some(p) => tag_start + p + 1,
                None => {
                    result.push_str(&html[tag_start..]);
                    break;
                }
            };

            let tag = &html[tag_start..tag_end];
            if is_image {
                result.push_str(&self.rewrite_image_tag(tag));
            } else {
                result.push_str(&Self::rewrite_link_tag(tag));
            }

            pos = tag_end;
        }

        result
    }

    /// Resolves `src` of one `<img ...>` tag and marks it lazy.
    fn rewrite_image_tag(&self, tag: &str) -> String {
        let mut tag = tag.to_string();

        if let (Some(resolver), Some((start, end))) =
            (&self.image_resolver, attribute_span(&tag, "src"))
        {
            let src = html_decode(&tag[start..end]);
            let resolved = html_escape(&resolver.resolve(&src));
            tag.replace_range(start..end, &resolved);
        }

        if attribute_span(&tag, "loading").is_none() {
            tag.insert_str("<img".len(), " loading=\"lazy\"");
        }

        tag
    }

    /// Adds new tab attributes to `<a ...>` tags pointing off site.
    fn rewrite_link_tag(tag: &str) -> String {
        let external = attribute_span(tag, "href")
            .map(|(start, end)| html_decode(&tag[start..end]))
            .is_some_and(|href| href.starts_with("http://") || href.starts_with("https://"));

        if !external || attribute_span(tag, "target").is_some() {
            return tag.to_string();
        }

        let mut tag = tag.to_string();
        tag.insert_str(
            "<a".len(),
            " target=\"_blank\" rel=\"noopener noreferrer\"",
        );
        tag
    }

    /// Post-processes HTML to apply syntax highlighting with CSS classes.
    ///
    /// Finds code blocks with language-* classes from comrak's output and
    /// replaces the plain text content with syntect highlighted HTML using
    /// CSS class names (hljs-* prefix).
    ///
    /// # Errors
    ///
    /// Returns error if highlighting fails
    fn highlight_code_blocks(&self, html: &str) -> Result<String> {
        let mut result = String::with_capacity(html.len());
        let mut last_end = 0;

        // Pattern: <code class="language-LANG">CODE</code>
        let mut search_pos = 0;

        while let Some(code_start) = html[search_pos..].find("<code class=\"language-") {
            let code_start = search_pos + code_start;

            let lang_start = code_start + "<code class=\"language-".len();
            let lang_end = match html[lang_start..].find('"') {
                Some(pos) => lang_start + pos,
                None => {
                    search_pos = code_start + 1;
                    continue;
                }
            };

            let language = &html[lang_start..lang_end];

            let content_start = match html[lang_end..].find('>') {
                Some(pos) => lang_end + pos + 1,
                None => {
                    search_pos = code_start + 1;
                    continue;
                }
            };

            let content_end = match html[content_start..].find("</code>") {
                Some(pos) => content_start + pos,
                None => {
                    search_pos = code_start + 1;
                    continue;
                }
            };

            // comrak escapes &, <, >, " inside code blocks
            let decoded_content = html_decode(&html[content_start..content_end]);

            result.push_str(&html[last_end..code_start]);

            let highlighted = self
                .highlight_code(&decoded_content, language)
                .context("Failed to highlight code block")?;

            result.push_str("<code class=\"language-");
            result.push_str(language);
            result.push_str("\">");
            result.push_str(&highlighted);
            result.push_str("</code>");

            last_end = content_end + "</code>".len();
            search_pos = last_end;
        }

        result.push_str(&html[last_end..]);

        Ok(result)
    }

    /// Highlights code with syntect using `hljs-` prefixed CSS classes.
    ///
    /// Unknown languages fall back to escaped plain text.
    fn highlight_code(&self, code: &str, language: &str) -> Result<String> {
        if code.is_empty() {
            return Ok(String::new());
        }

        let syntax = self
            .syntax_set
            .find_syntax_by_token(language)
            .or_else(|| self.syntax_set.find_syntax_by_extension(language));

        let Some(syntax) = syntax else {
            return Ok(html_escape(code));
        };

        let mut generator = ClassedHTMLGenerator::new_with_class_style(
            syntax,
            &self.syntax_set,
            ClassStyle::SpacedPrefixed { prefix: "hljs-" },
        );

        for line in LinesWithEndings::from(code) {
            generator
                .parse_html_for_line_which_includes_newline(line)
                .context("Failed to parse line for syntax highlighting")?;
        }

        Ok(generator.finalize())
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Finds the value span of a double quoted attribute inside a tag.
///
/// Returns byte offsets of the value (without quotes).
fn attribute_span(tag: &str, name: &str) -> Option<(usize, usize)> {
    let needle = format!(" {}=\"", name);
    let start = tag.find(&needle)? + needle.len();
    let end = start + tag[start..].find('"')?;
    Some((start, end))
}

/// Decodes the HTML entities comrak emits.
fn html_decode(html: &str) -> String {
    html.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&amp;", "&")
}

/// Escapes HTML special characters.
fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
