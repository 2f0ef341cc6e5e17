//! Field extraction over raw feed text.
//!
//! These helpers treat the upstream document as flat text and locate fields
//! with regular expressions rather than a tree parse. That keeps them tolerant
//! of attribute noise and partially malformed markup: as long as the literal
//! pattern appears, the field is found. First match wins in every case.

use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;

/// CDATA wrapper, unwrapped to its inner text after extraction.
static CDATA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!\[CDATA\[(.*?)\]\]>").expect("valid CDATA pattern"));

/// `media:thumbnail`-like element with a required `url` attribute and optional
/// `width`/`height`. Width and height are only detected when they appear in
/// that order after `url`, a known limitation of the attribute pattern.
static THUMBNAIL: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(
        r#"<media:thumbnail[^>]*?url=["']([^"']+)["'](?:[^>]*?width=["']([^"']*)["'])?(?:[^>]*?height=["']([^"']*)["'])?"#,
    )
    .case_insensitive(true)
    .build()
    .expect("valid thumbnail pattern")
});

/// Thumbnail metadata pulled from an entry fragment.
///
/// `width` and `height` are kept as strings exactly as found in the source,
/// and are empty when the attribute is absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    pub url: String,
    pub width: String,
    pub height: String,
}

/// Returns the inner text of the first `<[ns:]tag ...>...</[ns:]tag>` element.
///
/// Matching is case-insensitive and tolerates extra attributes on the opening
/// tag. The result is trimmed of surrounding whitespace and any CDATA wrapper
/// is unwrapped to its inner text. Returns an empty string when the tag is
/// absent.
pub fn extract_tag(text: &str, tag: &str, ns: &str) -> String {
    let name = if ns.is_empty() {
        regex::escape(tag)
    } else {
        format!("{}:{}", regex::escape(ns), regex::escape(tag))
    };
    let pattern = format!("(?is)<{name}[^>]*>(.*?)</{name}>");
    // The tag and namespace are regex-escaped, so the pattern always compiles.
    let re = Regex::new(&pattern).expect("escaped tag pattern is valid");

    match re.captures(text) {
        Some(caps) => {
            let inner = caps.get(1).map_or("", |m| m.as_str()).trim();
            CDATA.replace_all(inner, "${1}").into_owned()
        }
        None => String::new(),
    }
}

/// Returns the value of `attr` on the first `<tag ...>` element carrying it.
///
/// Accepts single- or double-quoted values, case-insensitively. Returns an
/// empty string when no such attribute is found.
pub fn extract_attr(text: &str, tag: &str, attr: &str) -> String {
    let pattern = format!(
        r#"(?i)<{}[^>]*{}=["']([^"']+)["']"#,
        regex::escape(tag),
        regex::escape(attr)
    );
    let re = Regex::new(&pattern).expect("escaped attribute pattern is valid");

    match re.captures(text) {
        Some(caps) => caps.get(1).map_or("", |m| m.as_str()).to_string(),
        None => String::new(),
    }
}

/// Locates the first media thumbnail in an entry fragment.
///
/// Returns `None` when no thumbnail with a `url` attribute is present.
pub fn extract_thumbnail(entry: &str) -> Option<Thumbnail> {
    let caps = THUMBNAIL.captures(entry)?;
    Some(Thumbnail {
        url: caps.get(1)?.as_str().to_string(),
        width: caps.get(2).map_or(String::new(), |m| m.as_str().to_string()),
        height: caps.get(3).map_or(String::new(), |m| m.as_str().to_string()),
    })
}
