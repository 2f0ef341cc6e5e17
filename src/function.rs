//! Serverless-style feed handler.
//!
//! A transport-agnostic variant of the `/feed` route: the host environment
//! decodes its event shape into a [`FunctionEvent`] and maps the returned
//! [`FunctionResponse`] back onto its own response type. Functionally
//! equivalent to the server adapter, minus the API-key gate.

use std::collections::HashMap;

use crate::feed::{generate_feed, FeedClient, FeedRequest};

pub const RSS_CONTENT_TYPE: &str = "application/rss+xml; charset=utf-8";
pub const TEXT_CONTENT_TYPE: &str = "text/plain";

/// Invocation event: just the decoded query-string parameters.
#[derive(Debug, Clone, Default)]
pub struct FunctionEvent {
    pub query_string_parameters: HashMap<String, String>,
}

impl FunctionEvent {
    /// Event with the given query parameters, mainly for tests and embedding.
    pub fn with_params<I, K, V>(params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            query_string_parameters: params
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Transport-neutral response record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionResponse {
    pub status_code: u16,
    pub content_type: &'static str,
    pub body: String,
}

/// Handles one feed-generation event.
///
/// Missing or blank `channel_id` yields a 400 with a usage hint; any
/// orchestration failure yields a 500 with a plain-text `Error: <message>`
/// body. On success the body is the complete MRSS document.
pub async fn handle(client: &FeedClient, event: &FunctionEvent) -> FunctionResponse {
    let params = &event.query_string_parameters;
    let channel_id = params.get("channel_id").map_or("", |s| s.trim());

    if channel_id.is_empty() {
        return FunctionResponse {
            status_code: 400,
            content_type: TEXT_CONTENT_TYPE,
            body: "Missing channel_id. Use ?channel_id=UCxxxx".to_string(),
        };
    }

    let request = FeedRequest {
        channel_id,
        max: params.get("max").map(String::as_str),
        api_key: None,
    };

    match generate_feed(client, &request).await {
        Ok(xml) => FunctionResponse {
            status_code: 200,
            content_type: RSS_CONTENT_TYPE,
            body: xml,
        },
        Err(e) => {
            tracing::error!(channel_id, error = %e, "Feed generation failed");
            FunctionResponse {
                status_code: 500,
                content_type: TEXT_CONTENT_TYPE,
                body: format!("Error: {e}"),
            }
        }
    }
}
