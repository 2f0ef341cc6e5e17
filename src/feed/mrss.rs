//! Media RSS document rendering.
//!
//! Produces an RSS 2.0 document with the `media` namespace, element names and
//! nesting kept bit-exact for feed-reader compatibility. Every interpolated
//! value passes through [`escape_xml`] so raw upstream text never reaches the
//! output markup.

use chrono::{DateTime, Utc};

use super::parser::{FeedItem, ParsedFeed};

/// Encodes the five reserved XML characters as entities.
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders a `published` timestamp as an HTTP-date string.
///
/// A value that does not parse as RFC-3339 renders as the literal string
/// `Invalid Date` rather than failing the whole document.
fn format_pub_date(published: &str) -> String {
    match DateTime::parse_from_rfc3339(published) {
        Ok(dt) => dt
            .with_timezone(&Utc)
            .format("%a, %d %b %Y %H:%M:%S GMT")
            .to_string(),
        Err(_) => "Invalid Date".to_string(),
    }
}

fn render_item(item: &FeedItem) -> String {
    let link = escape_xml(&item.link);
    let pub_date = format_pub_date(&item.published);

    let thumb_xml = match &item.thumbnail {
        Some(t) => format!(
            "\n      <media:thumbnail url=\"{}\" width=\"{}\" height=\"{}\" />",
            escape_xml(&t.url),
            escape_xml(&t.width),
            escape_xml(&t.height)
        ),
        None => String::new(),
    };

    format!(
        "\n    <item>\
         \n      <title>{title}</title>\
         \n      <link>{link}</link>\
         \n      <guid isPermaLink=\"true\">{link}</guid>\
         \n      <pubDate>{pub_date}</pubDate>\
         \n      <description>{description}</description>\
         \n      <enclosure url=\"{link}\" type=\"video/youtube\" length=\"0\" />\
         \n      <media:group>\
         \n      <media:content url=\"{link}\" medium=\"video\" type=\"video/youtube\" />{thumb_xml}\
         \n      </media:group>\
         \n    </item>",
        title = escape_xml(&item.title),
        description = escape_xml(&item.description),
    )
}

/// Renders the complete MRSS document for a channel.
pub fn build_mrss(channel_id: &str, feed: &ParsedFeed) -> String {
    let channel_link = format!("https://www.youtube.com/channel/{channel_id}");
    let item_xml: String = feed.items.iter().map(render_item).collect();

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
         \n<rss version=\"2.0\" xmlns:media=\"http://search.yahoo.com/mrss/\">\
         \n  <channel>\
         \n    <title>{title}</title>\
         \n    <link>{link}</link>\
         \n    <description>{description}</description>{item_xml}\
         \n  </channel>\
         \n</rss>",
        title = escape_xml(&feed.channel_title),
        link = escape_xml(&channel_link),
        description = escape_xml(&feed.channel_description),
    )
}
