//! Property-based tests for image link rewriting.
//!
//! These tests use proptest to verify rewriting invariants hold across
//! randomly generated note bodies and image paths.

use percent_encoding::percent_decode_str;
use proptest::prelude::*;
use regex::Regex;

use vaultpress::{
    ImageUrlResolver, escape_image_urls, normalize_images, note_path, rewrite_embeds,
};

const RAW_BASE: &str = "https://raw.githubusercontent.com";

/// Strategy for attachment names, optionally inside one directory.
fn attachment_name() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 _.-]{1,12}(/[a-zA-Z0-9 _.-]{1,12})?"
        .prop_filter("name must not be blank", |name| !name.trim().is_empty())
}

/// Strategy for plain prose around image references.
fn prose() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ,.\n]{0,20}"
}

fn resolver() -> ImageUrlResolver {
    ImageUrlResolver::new(RAW_BASE, "frechezz", "publicobs", "main")
}

proptest! {
    /// Rewritten bodies contain no Obsidian embed.
    #[test]
    fn embeds_are_fully_rewritten(
        before in prose(),
        name in attachment_name(),
        after in prose(),
    ) {
        let markdown = format!("{}![[{}]]{}", before, name, after);

        let rewritten = rewrite_embeds(&markdown);

        let embed = Regex::new(r"!\[\[(.*?)\]\]").unwrap();
        prop_assert!(!embed.is_match(&rewritten), "left embed in {:?}", rewritten);
        prop_assert!(rewritten.starts_with(&before));
        prop_assert!(rewritten.ends_with(&after));
    }

    /// Rewritten image URLs carry no raw whitespace.
    #[test]
    fn rewritten_urls_are_escaped(name in attachment_name()) {
        let rewritten = rewrite_embeds(&format!("![[{}]]", name));

        let url_start = rewritten.find("](").unwrap() + 2;
        let url = &rewritten[url_start..rewritten.len() - 1];
        prop_assert!(!url.contains(' '));
        prop_assert_eq!(percent_decode_str(url).decode_utf8().unwrap(), if name.contains('/') {
            name.clone()
        } else {
            format!("files/{}", name)
        });
    }

    /// Escaping image URLs twice equals escaping once.
    #[test]
    fn escape_is_idempotent(alt in "[a-zA-Z0-9 ]{0,10}", url in "[a-zA-Z0-9 ._/-]{0,30}") {
        let markdown = format!("![{}]({})", alt, url);

        let once = escape_image_urls(&markdown);
        let twice = escape_image_urls(&once);

        prop_assert_eq!(once, twice);
    }

    /// Normalizing a normalized body changes nothing.
    #[test]
    fn normalize_is_idempotent(
        before in prose(),
        name in attachment_name(),
        url in "[a-zA-Z0-9 ._/-]{1,20}",
    ) {
        let markdown = format!("{}![[{}]] and ![x]({})", before, name, url);

        let once = normalize_images(&markdown);
        let twice = normalize_images(&once);

        prop_assert_eq!(once, twice);
    }

    /// Relative paths resolve under the image repository, escaped once.
    #[test]
    fn resolved_urls_point_at_image_repository(name in attachment_name()) {
        let resolver = resolver();

        let resolved = resolver.resolve(&name);
        let twice_escaped = resolver.resolve(&rewrite_embeds(&format!("![[{}]]", name))
            .split("](")
            .nth(1)
            .unwrap()
            .trim_end_matches(')')
            .to_string());

        let tail = resolved.strip_prefix(resolver.base()).unwrap();
        prop_assert!(!tail.contains(' '));
        let expected = if name.contains('/') {
            name.clone()
        } else {
            format!("files/{}", name)
        };
        prop_assert_eq!(percent_decode_str(tail).decode_utf8().unwrap(), expected);
        prop_assert_eq!(resolved, twice_escaped, "escaped input must not be escaped again");
    }

    /// Root notes directories place notes at the repository root.
    #[test]
    fn root_notes_dir_paths(slug in "[a-z0-9-]{1,20}", dir in prop::sample::select(vec!["", ".", "/"])) {
        prop_assert_eq!(note_path(dir, &slug), format!("{}.md", slug));
        prop_assert_eq!(note_path("notes/", &slug), format!("notes/{}.md", slug));
    }
}
