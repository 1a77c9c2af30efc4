//! Rich text helpers.
//!
//! Stored rich text is editor HTML with internal references in the form
//! `<a linktype="page" id="12">`. The frontend either wants that HTML with
//! real hrefs, or plain paragraphs for components that do their own markup.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::warn;

use crate::models::ContentStore;

use super::link::page_url;

/// Separator inserted at block boundaries before tags are stripped.
const BREAK: char = '\u{1e}';

#[allow(clippy::expect_used)]
static BLOCK_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)</?(?:p|div|h[1-6]|li|ul|ol|blockquote|section|article)\b[^>]*>|<br\s*/?>")
        .expect("valid regex literal")
});

#[allow(clippy::expect_used)]
static ANY_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex literal"));

#[allow(clippy::expect_used)]
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex literal"));

#[allow(clippy::expect_used)]
static PAGE_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<a\b([^>]*)>"#).expect("valid regex literal"));

#[allow(clippy::expect_used)]
static ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\b(linktype|id)\s*=\s*"([^"]*)""#).expect("valid regex literal")
});

/// Flatten rich text into plain paragraphs.
///
/// Block-level tags and `<br>` end a paragraph, inline tags are dropped,
/// entities are decoded once, whitespace (including `&nbsp;`) is collapsed
/// and empty paragraphs are removed.
pub fn paragraphs(html: &str) -> Vec<String> {
    let marked = BLOCK_TAG.replace_all(html, BREAK.to_string().as_str());
    let stripped = ANY_TAG.replace_all(&marked, "");
    stripped
        .split(BREAK)
        .map(|chunk| {
            let decoded = html_escape::decode_html_entities(chunk);
            WHITESPACE.replace_all(decoded.trim(), " ").into_owned()
        })
        .filter(|p| !p.is_empty())
        .collect()
}

/// Rewrite internal page references into hrefs.
///
/// A reference to a missing or unroutable page becomes `href="/"`.
pub fn expand_links(html: &str, store: &dyn ContentStore) -> String {
    PAGE_LINK
        .replace_all(html, |caps: &Captures<'_>| {
            let attrs = &caps[1];
            let mut linktype = None;
            let mut id = None;
            for attr in ATTR.captures_iter(attrs) {
                match attr[1].to_ascii_lowercase().as_str() {
                    "linktype" => linktype = Some(attr[2].to_string()),
                    "id" => id = Some(attr[2].to_string()),
                    _ => {}
                }
            }
            if linktype.as_deref() != Some("page") {
                return caps[0].to_string();
            }
            let href = match id.as_deref().and_then(|id| id.parse().ok()) {
                Some(page_id) => page_url(store, page_id).unwrap_or_else(|e| {
                    warn!(page_id, error = %e, "broken rich text link");
                    "/".to_string()
                }),
                None => {
                    warn!(attrs = %attrs.trim(), "rich text page link without id");
                    "/".to_string()
                }
            };
            format!("<a href=\"{href}\">")
        })
        .into_owned()
}

/// Expand internal links, then strip anything unsafe.
pub fn render(html: &str, store: &dyn ContentStore) -> String {
    sanitize(&expand_links(html, store))
}

/// Sanitize HTML via ammonia.
pub fn sanitize(html: &str) -> String {
    ammonia::clean(html)
}
