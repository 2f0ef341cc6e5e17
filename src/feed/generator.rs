//! Feed orchestration: fetch the upstream Atom document, parse it, and render
//! the MRSS output.

use thiserror::Error;

use super::mrss::build_mrss;
use super::parser::parse_atom_feed;

/// YouTube's public feed returns at most this many entries, so requested caps
/// above it are clamped and it doubles as the default.
pub const DEFAULT_MAX_ITEMS: usize = 15;

const YOUTUBE_FEED_URL: &str = "https://www.youtube.com/feeds/videos.xml";

/// Errors that can occur while generating a feed.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// Upstream responded with a non-2xx status code
    #[error("Failed to fetch feed: {0}")]
    FetchStatus(u16),
    /// Upstream response parsed but yielded no channel title
    #[error("Channel not found")]
    ChannelNotFound,
    /// The server adapter was started without an API key in its environment
    #[error("YOUTUBE_API_KEY not configured")]
    NotConfigured,
}

/// HTTP client for the upstream feed endpoint.
///
/// Wraps a [`reqwest::Client`] together with the endpoint base URL. The base
/// URL is overridable so tests can point it at a mock server.
#[derive(Debug, Clone)]
pub struct FeedClient {
    http: reqwest::Client,
    base_url: String,
}

impl FeedClient {
    /// Client against the real YouTube feed endpoint.
    pub fn new() -> Self {
        Self::with_base_url(YOUTUBE_FEED_URL)
    }

    /// Client against an alternative endpoint (tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetches the raw Atom document for a channel.
    ///
    /// The channel id is interpolated into the query string as-is; no
    /// validation beyond presence is applied. No timeout or retry is layered
    /// on top of the transport.
    async fn fetch_atom(&self, channel_id: &str) -> Result<String, FeedError> {
        let url = format!("{}?channel_id={}", self.base_url, channel_id);
        let response = self.http.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(FeedError::FetchStatus(response.status().as_u16()));
        }
        Ok(response.text().await?)
    }
}

impl Default for FeedClient {
    fn default() -> Self {
        Self::new()
    }
}

/// One feed-generation request, as decoded by an HTTP adapter.
#[derive(Debug, Clone)]
pub struct FeedRequest<'a> {
    pub channel_id: &'a str,
    /// Raw `max` query parameter, if any; parsed by [`effective_cap`].
    pub max: Option<&'a str>,
    /// Carried by the server adapter but never used by the fetch path: the
    /// public feed endpoint takes no key, yet the route gates on one being
    /// configured (see DESIGN.md).
    pub api_key: Option<&'a str>,
}

/// Resolves the requested `max` parameter to the effective item cap.
///
/// Unparseable, absent, or zero values fall back to [`DEFAULT_MAX_ITEMS`];
/// anything above the upstream's native limit is clamped down to it.
pub fn effective_cap(max: Option<&str>) -> usize {
    max.and_then(|m| m.trim().parse::<usize>().ok())
        .filter(|&n| n > 0)
        .unwrap_or(DEFAULT_MAX_ITEMS)
        .min(DEFAULT_MAX_ITEMS)
}

/// Fetches, parses, and re-renders a channel feed as an MRSS document.
///
/// # Errors
///
/// - [`FeedError::Network`] when the upstream request fails at the transport
/// - [`FeedError::FetchStatus`] when the upstream status is not 2xx
/// - [`FeedError::ChannelNotFound`] when no channel title can be extracted
pub async fn generate_feed(
    client: &FeedClient,
    request: &FeedRequest<'_>,
) -> Result<String, FeedError> {
    let cap = effective_cap(request.max);
    let xml = client.fetch_atom(request.channel_id).await?;
    let feed = parse_atom_feed(&xml, cap);

    if feed.channel_title.is_empty() {
        return Err(FeedError::ChannelNotFound);
    }

    Ok(build_mrss(request.channel_id, &feed))
}
