//! Browser search page
//!
//! A single static page that calls `GET /search` on the same origin and
//! lists the returned items along with where they came from.

/// The search page, embedded at compile time
pub const INDEX_HTML: &str = include_str!("../static/index.html");
