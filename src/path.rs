//! Path and URL encoding utilities shared by the fetcher and link rewriter.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

/// Characters left untouched when escaping a whole URL.
///
/// Mirrors the browser `encodeURI` set: reserved URL delimiters survive,
/// whitespace, `%`, brackets and non ASCII bytes are escaped.
const URI: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b';')
    .remove(b',')
    .remove(b'/')
    .remove(b'?')
    .remove(b':')
    .remove(b'@')
    .remove(b'&')
    .remove(b'=')
    .remove(b'+')
    .remove(b'$')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'#');

/// Characters left untouched when escaping a single path segment.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Directory inside the image repository holding pasted attachments.
pub const ATTACHMENTS_DIR: &str = "files";

/// Markdown extension of note files.
const NOTE_EXTENSION: &str = ".md";

/// Percent-encodes a URL, keeping reserved delimiters such as `/` and `?`.
pub fn encode_uri(url: &str) -> String {
    utf8_percent_encode(url, URI).to_string()
}

/// Percent-encodes one path segment, including `/` and `?`.
pub fn encode_component(segment: &str) -> String {
    utf8_percent_encode(segment, COMPONENT).to_string()
}

/// Encodes every `/` separated segment of a path independently.
///
/// # Examples
///
/// ```
/// use vaultpress::encode_segments;
///
/// assert_eq!(encode_segments("files/my image.png"), "files/my%20image.png");
/// ```
pub fn encode_segments(path: &str) -> String {
    path.split('/')
        .map(encode_component)
        .collect::<Vec<_>>()
        .join("/")
}

/// Decodes percent escapes once.
///
/// Returns `None` when the decoded bytes are not valid UTF-8; callers keep
/// the original value in that case.
pub fn decode_once(value: &str) -> Option<String> {
    percent_decode_str(value)
        .decode_utf8()
        .ok()
        .map(|decoded| decoded.into_owned())
}

/// Builds the repository path of the note file for `slug`.
///
/// An empty notes directory, or `.`, places notes at the repository root.
/// The existence probe and the note fetch both go through this function so
/// they always agree on the file they look at.
pub fn note_path(notes_dir: &str, slug: &str) -> String {
    let dir = notes_dir.trim_matches('/');
    if dir.is_empty() || dir == "." {
        format!("{}{}", slug, NOTE_EXTENSION)
    } else {
        format!("{}/{}{}", dir, slug, NOTE_EXTENSION)
    }
}

/// Derives a note slug from its file name by stripping the `.md` extension.
///
/// Returns `None` for files that are not Markdown notes.
pub fn slug_from_filename(file_name: &str) -> Option<&str> {
    file_name
        .strip_suffix(NOTE_EXTENSION)
        .filter(|slug| !slug.is_empty())
}
