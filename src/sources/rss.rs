//! Publisher feed adapter
//!
//! Iterates a fixed list of publisher feeds, converting each through a
//! feed-to-JSON endpoint. At most the first five items per feed are taken;
//! descriptions are stripped of markup and truncated for display. One dead
//! feed never aborts the others: per-feed failures are logged and the
//! remaining feeds still contribute.

use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, warn};

use super::sanitize::{strip_markup, truncate_with_ellipsis};
use super::{map_transport_error, NewsSource};
use crate::categorizer::classify;
use crate::error::SourceError;
use crate::models::{audience_tags, display_date, placeholder_image, Article};

/// Default feed-to-JSON conversion endpoint
const DEFAULT_CONVERTER: &str = "https://api.rss2json.com/v1/api.json";

/// Fixed publisher feed list: (feed URL, source label)
pub const DEFAULT_FEEDS: &[(&str, &str)] = &[
    ("https://feeds.feedburner.com/ndtvnews-india-news", "NDTV"),
    ("https://www.indiatoday.in/rss/1206578", "India Today"),
    ("https://feeds.feedburner.com/TheHindu-News", "The Hindu"),
];

/// Items taken per feed
const ITEMS_PER_FEED: usize = 5;

/// Display length bound for feed descriptions, in characters
const DESCRIPTION_LIMIT: usize = 200;

/// One publisher feed
#[derive(Debug, Clone)]
pub struct Feed {
    pub url: String,
    pub source: String,
}

/// Adapter for publisher feeds routed through a feed-to-JSON converter
pub struct FeedSource {
    client: Client,
    converter: String,
    feeds: Vec<Feed>,
}

#[derive(Debug, Deserialize)]
struct ConvertedFeed {
    items: Option<Vec<RawItem>>,
}

/// Item shape produced by the conversion endpoint
#[derive(Debug, Default, Deserialize)]
struct RawItem {
    title: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
    link: Option<String>,
    thumbnail: Option<String>,
    description: Option<String>,
    enclosure: Option<RawEnclosure>,
}

#[derive(Debug, Deserialize)]
struct RawEnclosure {
    link: Option<String>,
}

impl FeedSource {
    /// Create an adapter over the default publisher feed list
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Http` if the HTTP client cannot be created
    pub fn new(timeout: Duration) -> Result<Self, SourceError> {
        let client = Client::builder().timeout(timeout).gzip(true).build()?;

        let feeds = DEFAULT_FEEDS
            .iter()
            .map(|(url, source)| Feed {
                url: url.to_string(),
                source: source.to_string(),
            })
            .collect();

        Ok(Self {
            client,
            converter: DEFAULT_CONVERTER.to_string(),
            feeds,
        })
    }

    /// Override the feed list
    pub fn with_feeds(mut self, feeds: Vec<Feed>) -> Self {
        self.feeds = feeds;
        self
    }

    /// Override the conversion endpoint, for tests against a mock server
    pub fn with_converter(mut self, endpoint: impl Into<String>) -> Self {
        self.converter = endpoint.into();
        self
    }

    async fn fetch_feed(&self, feed: &Feed) -> Result<Vec<RawItem>, SourceError> {
        let response = self
            .client
            .get(&self.converter)
            .query(&[("rss_url", feed.url.as_str())])
            .send()
            .await
            .map_err(map_transport_error)?
            .error_for_status()?;

        let payload: ConvertedFeed = response.json().await?;
        payload
            .items
            .ok_or_else(|| SourceError::malformed(&feed.source, "missing items array"))
    }

    /// Map converted feed items onto the common article shape
    ///
    /// `offset` is the count of articles already collected from earlier
    /// feeds; ids and placeholder picks continue from it.
    fn normalize(source_label: &str, items: Vec<RawItem>, offset: usize) -> Vec<Article> {
        items
            .into_iter()
            .take(ITEMS_PER_FEED)
            .enumerate()
            .map(|(idx, item)| {
                let title = item.title.unwrap_or_default();
                let stripped = item
                    .description
                    .as_deref()
                    .map(strip_markup)
                    .filter(|d| !d.is_empty());
                let description = match &stripped {
                    Some(text) => truncate_with_ellipsis(text, DESCRIPTION_LIMIT),
                    None => title.clone(),
                };
                // Classify on the full stripped text, not the truncation
                let category =
                    classify(&format!("{title} {}", stripped.as_deref().unwrap_or("")));
                let published_at = item.pub_date.unwrap_or_default();

                Article {
                    id: (offset + idx) as u32 + 1,
                    date: display_date(&published_at),
                    image: item
                        .enclosure
                        .and_then(|e| e.link)
                        .filter(|u| !u.is_empty())
                        .or(item.thumbnail.filter(|u| !u.is_empty()))
                        .unwrap_or_else(|| placeholder_image(offset + idx).to_string()),
                    source: source_label.to_string(),
                    url: item.link.unwrap_or_default(),
                    title,
                    description,
                    published_at,
                    category,
                    important_for: audience_tags(),
                }
            })
            .collect()
    }
}

#[async_trait]
impl NewsSource for FeedSource {
    fn name(&self) -> &str {
        "RSS feeds"
    }

    async fn fetch(&self) -> Result<Vec<Article>, SourceError> {
        let results = join_all(self.feeds.iter().map(|feed| self.fetch_feed(feed))).await;

        let mut articles = Vec::new();
        for (feed, result) in self.feeds.iter().zip(results) {
            match result {
                Ok(items) => {
                    let normalized = Self::normalize(&feed.source, items, articles.len());
                    info!(source = %feed.source, count = normalized.len(), "Feed fetched");
                    articles.extend(normalized);
                }
                Err(err) => {
                    warn!(source = %feed.source, error = %err, "Feed failed, continuing with the rest");
                }
            }
        }

        Ok(articles)
    }
}
