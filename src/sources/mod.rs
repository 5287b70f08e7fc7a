//! Source adapters
//!
//! One adapter per upstream kind, each translating that upstream's article
//! shape into the common [`Article`] shape:
//!
//! - [`NewsApiSource`] - keyed top-headlines API, tried first when a
//!   credential is configured
//! - [`FeedSource`] - publisher RSS feeds routed through a feed-to-JSON
//!   conversion endpoint, the fallback when the keyed API yields too little
//!
//! Adapters perform network calls only; they never touch shared state. All
//! upstream variability (optional fields, markup, sentinel titles, malformed
//! timestamps) is absorbed at this boundary.

pub mod newsapi;
pub mod rss;
pub mod sanitize;

pub use newsapi::NewsApiSource;
pub use rss::{Feed, FeedSource};

use crate::error::SourceError;
use crate::models::Article;
use async_trait::async_trait;

/// A fallible upstream news source
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Short label identifying the adapter in logs
    fn name(&self) -> &str;

    /// Fetch and normalize articles from the upstream
    ///
    /// Returned articles are fully normalized: categorized, display dates
    /// derived, ids numbered sequentially from 1. A failure here is local to
    /// the adapter; the aggregator logs it and continues with zero articles
    /// from this source.
    async fn fetch(&self) -> Result<Vec<Article>, SourceError>;
}

/// Distinguish timeouts from other transport failures
pub(crate) fn map_transport_error(err: reqwest::Error) -> SourceError {
    if err.is_timeout() {
        SourceError::Timeout
    } else {
        SourceError::Http(err)
    }
}
