//! YouTube Atom → Media RSS gateway.
//!
//! Fetches a channel's public Atom syndication feed, extracts a bounded
//! number of entries, and re-serializes them as a Media RSS (MRSS) document
//! that ordinary RSS readers consume. Exposed two ways:
//!
//! - [`server`] - an axum route (`GET /feed`) with static file fallback
//! - [`function`] - a transport-agnostic handler for serverless hosts
//!
//! Both delegate to the same transform core in [`feed`]. All state is
//! per-request; nothing is cached or persisted.

pub mod config;
pub mod feed;
pub mod function;
pub mod server;

use std::net::SocketAddr;

pub use config::Config;
pub use feed::{generate_feed, FeedClient, FeedError, FeedRequest};
pub use server::{create_router, AppState};

/// Binds the listener and serves requests until the process exits.
pub async fn run_server(config: Config) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::debug!(?config, "Starting with configuration");

    let state = AppState::new(config);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("MRSS server at http://localhost:{}", addr.port());

    axum::serve(listener, app).await?;
    Ok(())
}
