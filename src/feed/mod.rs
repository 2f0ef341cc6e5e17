//! The Atom-to-MRSS transform core.
//!
//! This module turns a channel's upstream Atom document into a Media RSS
//! document:
//!
//! - `extract` - Field extraction over raw feed text (patterns, not a tree parse)
//! - `parser` - Entry splitting and normalization into [`FeedItem`] records
//! - `mrss` - XML escaping and MRSS document rendering
//! - `generator` - Orchestration: fetch, parse, render, error mapping
//!
//! The extraction layer deliberately treats XML as flat text and matches tags
//! with case-insensitive patterns, first match wins. That mirrors what feed
//! readers actually tolerate and keeps the transform working on partially
//! malformed upstream documents.

mod extract;
mod generator;
mod mrss;
mod parser;

pub use extract::{extract_attr, extract_tag, extract_thumbnail, Thumbnail};
pub use generator::{
    effective_cap, generate_feed, FeedClient, FeedError, FeedRequest, DEFAULT_MAX_ITEMS,
};
pub use mrss::{build_mrss, escape_xml};
pub use parser::{parse_atom_feed, FeedItem, ParsedFeed};
