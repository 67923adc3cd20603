//! Front matter extraction for Markdown notes.

use serde_yaml::{Mapping, Value};
use tracing::warn;

/// Fence line opening and closing a front matter block.
const FENCE: &str = "---";

/// Markdown document split into front matter and body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    /// Key/value pairs from the front matter block (empty when absent)
    pub metadata: Mapping,
    /// Markdown following the block, or the whole input without one
    pub body: String,
}

impl Document {
    /// Returns string value for key, if present and a string.
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).and_then(Value::as_str)
    }

    /// Returns string value for key, accepting scalars of any type.
    ///
    /// YAML reads `date: 2023-01-15` as a string but `version: 2` as a
    /// number; both are useful as display text.
    pub fn text_field(&self, key: &str) -> Option<String> {
        match self.metadata.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Returns boolean value for key, if present and a boolean.
    pub fn bool_field(&self, key: &str) -> Option<bool> {
        self.metadata.get(key).and_then(Value::as_bool)
    }

    /// Returns list of strings for key.
    ///
    /// Accepts a YAML sequence or a single string, which becomes a one
    /// element list. Non string sequence items are skipped.
    pub fn list_field(&self, key: &str) -> Option<Vec<String>> {
        match self.metadata.get(key)? {
            Value::Sequence(items) => Some(
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(String::from)
                    .collect(),
            ),
            Value::String(s) => Some(vec![s.clone()]),
            _ => None,
        }
    }
}

/// Splits a raw Markdown document into front matter and body.
///
/// The block must start on the first line with `---` and end at the next
/// line consisting of `---`. Documents without a block, or with a block
/// that is never closed, are returned unchanged with empty metadata. A
/// closed block holding invalid YAML (or YAML that is not a mapping) is
/// dropped from the body and yields empty metadata.
///
/// # Examples
///
/// ```
/// use vaultpress::parse_front_matter;
///
/// let doc = parse_front_matter("---\ntitle: Hello\n---\n# Body\n");
/// assert_eq!(doc.str_field("title"), Some("Hello"));
/// assert_eq!(doc.body, "# Body\n");
/// ```
pub fn parse(raw: &str) -> Document {
    let content = raw.strip_prefix('\u{feff}').unwrap_or(raw);

    let Some((yaml, body)) = split_block(content) else {
        return Document {
            metadata: Mapping::new(),
            body: raw.to_string(),
        };
    };

    let metadata = if yaml.trim().is_empty() {
        Mapping::new()
    } else {
        match serde_yaml::from_str::<Value>(yaml) {
            Ok(Value::Mapping(map)) => map,
            Ok(Value::Null) => Mapping::new(),
            Ok(_) => {
                warn!("Front matter is not a key/value mapping, ignoring it");
                Mapping::new()
            }
            Err(e) => {
                warn!("Failed to parse front matter: {}", e);
                Mapping::new()
            }
        }
    };

    Document {
        metadata,
        body: body.to_string(),
    }
}

/// Locates the fenced block, returning YAML text and the remaining body.
fn split_block(content: &str) -> Option<(&str, &str)> {
    let (first, mut rest) = next_line(content)?;
    if first.trim_end() != FENCE {
        return None;
    }

    let yaml_start = content.len() - rest.len();
    loop {
        let line_start = content.len() - rest.len();
        let (line, remaining) = next_line(rest)?;
        if line.trim_end() == FENCE {
            return Some((&content[yaml_start..line_start], remaining));
        }
        rest = remaining;
    }
}

/// Splits off the first line (without its terminator) from `text`.
///
/// Returns `None` once `text` is exhausted.
fn next_line(text: &str) -> Option<(&str, &str)> {
    if text.is_empty() {
        return None;
    }

    match text.find('\n') {
        Some(pos) => {
            let line = text[..pos].strip_suffix('\r').unwrap_or(&text[..pos]);
            Some((line, &text[pos + 1..]))
        }
        None => Some((text, "")),
    }
}
