//! End-to-end tests for the `/feed` route: a real server on an ephemeral port
//! in front of a wiremock upstream standing in for the YouTube feed endpoint.

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ytmrss::{create_router, AppState, Config, FeedClient};

const DEMO_ATOM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns:yt="http://www.youtube.com/xml/schemas/2015" xmlns:media="http://search.yahoo.com/mrss/">
  <title>Demo Channel</title>
  <subtitle>About demos</subtitle>
  <entry>
    <yt:videoId>abc123</yt:videoId>
    <title>Video One</title>
    <published>2025-08-05T14:30:00+00:00</published>
    <media:description>First clip</media:description>
    <media:thumbnail url="https://i.ytimg.com/vi/abc123/hq.jpg" width="480" height="360"/>
  </entry>
</feed>"#;

fn test_config() -> Config {
    Config::from_vars(None, Some("test-key"), None)
}

/// Serves the app on an ephemeral port and returns its base URL.
async fn spawn_app(config: Config, upstream: &MockServer) -> String {
    let client = FeedClient::with_base_url(format!("{}/feeds/videos.xml", upstream.uri()));
    let app = create_router(AppState::with_client(config, client));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

async fn mount_feed(upstream: &MockServer, channel_id: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path("/feeds/videos.xml"))
        .and(query_param("channel_id", channel_id))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(upstream)
        .await;
}

#[tokio::test]
async fn test_missing_channel_id_returns_400() {
    let upstream = MockServer::start().await;
    let base = spawn_app(test_config(), &upstream).await;

    let response = reqwest::get(format!("{base}/feed")).await.unwrap();
    assert_eq!(response.status(), 400);
    let body = response.text().await.unwrap();
    assert!(body.contains("Missing channel_id"));

    // No upstream call is made for a missing parameter.
    assert!(upstream.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_blank_channel_id_returns_400() {
    let upstream = MockServer::start().await;
    let base = spawn_app(test_config(), &upstream).await;

    let response = reqwest::get(format!("{base}/feed?channel_id=%20%20"))
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_success_returns_mrss_document() {
    let upstream = MockServer::start().await;
    mount_feed(&upstream, "UC123", DEMO_ATOM).await;
    let base = spawn_app(test_config(), &upstream).await;

    let response = reqwest::get(format!("{base}/feed?channel_id=UC123"))
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(
        response
            .headers()
            .get("content-type")
            .unwrap()
            .to_str()
            .unwrap(),
        "application/rss+xml; charset=utf-8"
    );

    let body = response.text().await.unwrap();
    assert!(body.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(body.contains("<title>Demo Channel</title>"));
    assert!(body.contains("<description>About demos</description>"));
    assert!(body.contains("<link>https://www.youtube.com/channel/UC123</link>"));
    assert!(body.contains("<title>Video One</title>"));
    assert!(body.contains("<link>https://www.youtube.com/watch?v=abc123</link>"));
    assert!(body.contains("<pubDate>Tue, 05 Aug 2025 14:30:00 GMT</pubDate>"));
    assert!(body.contains(
        "<media:thumbnail url=\"https://i.ytimg.com/vi/abc123/hq.jpg\" width=\"480\" height=\"360\" />"
    ));
}

#[tokio::test]
async fn test_upstream_404_maps_to_500() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&upstream)
        .await;
    let base = spawn_app(test_config(), &upstream).await;

    let response = reqwest::get(format!("{base}/feed?channel_id=UCgone"))
        .await
        .unwrap();
    assert_eq!(response.status(), 500);
    let body = response.text().await.unwrap();
    assert!(body.contains("Failed to fetch feed: 404"));
}

#[tokio::test]
async fn test_unknown_channel_maps_to_500() {
    let upstream = MockServer::start().await;
    mount_feed(&upstream, "UCmissing", "<feed></feed>").await;
    let base = spawn_app(test_config(), &upstream).await;

    let response = reqwest::get(format!("{base}/feed?channel_id=UCmissing"))
        .await
        .unwrap();
    // Channel-not-found surfaces as 500, not 404 (see DESIGN.md).
    assert_eq!(response.status(), 500);
    assert_eq!(
        response.text().await.unwrap(),
        "Error: Channel not found"
    );
}

#[tokio::test]
async fn test_missing_api_key_returns_500_before_upstream_call() {
    let upstream = MockServer::start().await;
    let base = spawn_app(Config::default(), &upstream).await;

    let response = reqwest::get(format!("{base}/feed?channel_id=UC123"))
        .await
        .unwrap();
    assert_eq!(response.status(), 500);
    assert_eq!(
        response.text().await.unwrap(),
        "Error: YOUTUBE_API_KEY not configured"
    );
    assert!(upstream.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_max_caps_item_count() {
    let entries: String = (0..5)
        .map(|i| format!("<entry><yt:videoId>v{i}</yt:videoId></entry>"))
        .collect();
    let body = format!("<feed><title>T</title>{entries}</feed>");

    let upstream = MockServer::start().await;
    mount_feed(&upstream, "UC123", &body).await;
    let base = spawn_app(test_config(), &upstream).await;

    let response = reqwest::get(format!("{base}/feed?channel_id=UC123&max=3"))
        .await
        .unwrap();
    let body = response.text().await.unwrap();
    assert_eq!(body.matches("<item>").count(), 3);
}

#[tokio::test]
async fn test_non_numeric_max_falls_back_to_default() {
    let entries: String = (0..3)
        .map(|i| format!("<entry><yt:videoId>v{i}</yt:videoId></entry>"))
        .collect();
    let body = format!("<feed><title>T</title>{entries}</feed>");

    let upstream = MockServer::start().await;
    mount_feed(&upstream, "UC123", &body).await;
    let base = spawn_app(test_config(), &upstream).await;

    let response = reqwest::get(format!("{base}/feed?channel_id=UC123&max=lots"))
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body = response.text().await.unwrap();
    assert_eq!(body.matches("<item>").count(), 3);
}

#[tokio::test]
async fn test_reserved_characters_are_escaped_end_to_end() {
    let body = "<feed><title><![CDATA[<b>A & B</b>]]></title>\
                <entry><yt:videoId>abc</yt:videoId>\
                <title><![CDATA[<b>A & B</b>]]></title></entry></feed>";

    let upstream = MockServer::start().await;
    mount_feed(&upstream, "UC123", body).await;
    let base = spawn_app(test_config(), &upstream).await;

    let response = reqwest::get(format!("{base}/feed?channel_id=UC123"))
        .await
        .unwrap();
    let body = response.text().await.unwrap();
    assert!(body.contains("<title>&lt;b&gt;A &amp; B&lt;/b&gt;</title>"));
    assert!(!body.contains("<title><b>"));
}

#[tokio::test]
async fn test_unrouted_path_falls_back_to_static_files() {
    let upstream = MockServer::start().await;
    let base = spawn_app(test_config(), &upstream).await;

    // The default static dir is the working directory; Cargo.toml exists there.
    let response = reqwest::get(format!("{base}/Cargo.toml")).await.unwrap();
    assert_eq!(response.status(), 200);

    let response = reqwest::get(format!("{base}/definitely-not-here.txt"))
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
}
