//! Atom feed parsing into normalized item records.

use regex::Regex;
use std::sync::LazyLock;

use super::extract::{extract_attr, extract_tag, extract_thumbnail, Thumbnail};

/// Entry fragments in document order, non-greedy so adjacent entries do not
/// merge into one fragment.
static ENTRY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<entry>(.*?)</entry>").expect("valid entry pattern"));

/// One syndicated entry, normalized for the MRSS builder.
///
/// `video_id` is always non-empty: entries without a resolvable identifier
/// are dropped during parsing rather than carried forward as malformed items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItem {
    pub video_id: String,
    pub title: String,
    /// Watch URL, taken from the entry's `link` href or synthesized from the
    /// video id when no href is present.
    pub link: String,
    /// Publication timestamp as found in the source (RFC-3339 in practice).
    pub published: String,
    pub description: String,
    pub thumbnail: Option<Thumbnail>,
}

/// Channel-level fields plus the bounded item list.
///
/// An empty `channel_title` signals that the channel does not exist; the
/// orchestrator turns that into a not-found failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFeed {
    pub channel_title: String,
    pub channel_description: String,
    pub items: Vec<FeedItem>,
}

/// Canonical watch URL for a video id.
pub(crate) fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={video_id}")
}

/// Parses a raw Atom document into a [`ParsedFeed`] with at most `max_items`
/// items.
///
/// Entries are processed in document order until the cap is reached. An entry
/// with neither a `yt:videoId` tag nor a parsable `v=` parameter in its link
/// href is skipped and does not count toward the cap.
pub fn parse_atom_feed(xml: &str, max_items: usize) -> ParsedFeed {
    let channel_title = extract_tag(xml, "title", "");
    let channel_description = extract_tag(xml, "subtitle", "");

    let mut items = Vec::new();
    for caps in ENTRY.captures_iter(xml) {
        if items.len() >= max_items {
            break;
        }
        let entry = caps.get(1).map_or("", |m| m.as_str());

        let href = extract_attr(entry, "link", "href");
        let mut video_id = extract_tag(entry, "videoId", "yt");
        if video_id.is_empty() {
            video_id = video_id_from_link(&href);
        }
        if video_id.is_empty() {
            continue;
        }

        let link = if href.is_empty() {
            watch_url(&video_id)
        } else {
            href
        };

        items.push(FeedItem {
            title: extract_tag(entry, "title", ""),
            published: extract_tag(entry, "published", ""),
            description: extract_tag(entry, "description", "media"),
            thumbnail: extract_thumbnail(entry),
            video_id,
            link,
        });
    }

    ParsedFeed {
        channel_title,
        channel_description,
        items,
    }
}

/// Pulls the `v=` parameter value out of a link href: everything after the
/// first `v=` up to the next `&` or the end of the string.
fn video_id_from_link(href: &str) -> String {
    match href.find("v=") {
        Some(idx) => href[idx + 2..]
            .split('&')
            .next()
            .unwrap_or("")
            .to_string(),
        None => String::new(),
    }
}
