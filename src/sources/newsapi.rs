//! Keyed top-headlines API adapter
//!
//! Calls the NewsAPI top-headlines endpoint with an API key and country
//! filter and maps its article shape onto the common one. Entries with an
//! empty title or the upstream's `[Removed]` sentinel are skipped.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{map_transport_error, NewsSource};
use crate::categorizer::classify;
use crate::error::SourceError;
use crate::models::{audience_tags, display_date, placeholder_image, Article};

/// Default top-headlines endpoint
const DEFAULT_ENDPOINT: &str = "https://newsapi.org/v2/top-headlines";

/// Sentinel title the upstream substitutes for withdrawn articles
const REMOVED_TITLE: &str = "[Removed]";

/// Adapter for the keyed top-headlines API
pub struct NewsApiSource {
    client: Client,
    endpoint: String,
    api_key: String,
    country: String,
    page_size: u32,
}

#[derive(Debug, Deserialize)]
struct HeadlinesResponse {
    #[serde(default)]
    articles: Vec<RawHeadline>,
}

/// Upstream article shape; every field is optional in practice
#[derive(Debug, Default, Deserialize)]
struct RawHeadline {
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    #[serde(rename = "urlToImage")]
    url_to_image: Option<String>,
    source: Option<RawSourceRef>,
    #[serde(rename = "publishedAt")]
    published_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawSourceRef {
    name: Option<String>,
}

impl NewsApiSource {
    /// Create an adapter for the given credential
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Http` if the HTTP client cannot be created
    pub fn new(
        api_key: impl Into<String>,
        country: impl Into<String>,
        page_size: u32,
        timeout: Duration,
    ) -> Result<Self, SourceError> {
        let client = Client::builder().timeout(timeout).gzip(true).build()?;

        Ok(Self {
            client,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: api_key.into(),
            country: country.into(),
            page_size,
        })
    }

    /// Override the endpoint, for tests against a mock server
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Map upstream headlines onto the common article shape
    ///
    /// Ids are assigned sequentially from 1 after the sentinel filter, so a
    /// skipped entry leaves no gap.
    fn normalize(&self, raw: Vec<RawHeadline>) -> Vec<Article> {
        raw.into_iter()
            .filter(|h| {
                h.title
                    .as_deref()
                    .is_some_and(|t| !t.is_empty() && t != REMOVED_TITLE)
            })
            .enumerate()
            .map(|(idx, h)| {
                let title = h.title.unwrap_or_default();
                let description = h
                    .description
                    .filter(|d| !d.is_empty())
                    .unwrap_or_else(|| title.clone());
                let published_at = h.published_at.unwrap_or_default();

                Article {
                    id: idx as u32 + 1,
                    category: classify(&format!("{title} {description}")),
                    date: display_date(&published_at),
                    image: h
                        .url_to_image
                        .filter(|u| !u.is_empty())
                        .unwrap_or_else(|| placeholder_image(idx).to_string()),
                    source: h
                        .source
                        .and_then(|s| s.name)
                        .unwrap_or_else(|| "News".to_string()),
                    url: h.url.unwrap_or_default(),
                    title,
                    description,
                    published_at,
                    important_for: audience_tags(),
                }
            })
            .collect()
    }
}

#[async_trait]
impl NewsSource for NewsApiSource {
    fn name(&self) -> &str {
        "NewsAPI"
    }

    async fn fetch(&self) -> Result<Vec<Article>, SourceError> {
        let page_size = self.page_size.to_string();

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("country", self.country.as_str()),
                ("pageSize", page_size.as_str()),
                ("apiKey", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(map_transport_error)?
            .error_for_status()?;

        let payload: HeadlinesResponse = response.json().await?;
        Ok(self.normalize(payload.articles))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn adapter() -> NewsApiSource {
        NewsApiSource::new("test-key", "in", 20, Duration::from_secs(10)).unwrap()
    }

    fn headline(title: &str) -> RawHeadline {
        RawHeadline {
            title: Some(title.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_normalize_skips_removed_and_empty_titles() {
        let raw = vec![
            headline("Parliament session begins"),
            headline(REMOVED_TITLE),
            headline(""),
            RawHeadline::default(),
            headline("ISRO launch window announced"),
        ];

        let articles = adapter().normalize(raw);
        assert_eq!(articles.len(), 2);
        // Ids are sequential after filtering, no gaps
        assert_eq!(articles[0].id, 1);
        assert_eq!(articles[1].id, 2);
    }

    #[test]
    fn test_normalize_fallbacks() {
        let raw = vec![headline("Some headline text")];
        let article = adapter().normalize(raw).remove(0);

        assert_eq!(article.description, "Some headline text");
        assert_eq!(article.source, "News");
        assert_eq!(article.image, placeholder_image(0));
        assert_eq!(article.date, "");
        assert_eq!(article.important_for, audience_tags());
    }

    #[test]
    fn test_normalize_categorizes_from_title_and_description() {
        let raw = vec![RawHeadline {
            title: Some("Morning briefing".to_string()),
            description: Some("Stock market rallies after budget".to_string()),
            ..Default::default()
        }];

        let article = adapter().normalize(raw).remove(0);
        assert_eq!(article.category, Category::Economy);
    }

    #[test]
    fn test_normalize_keeps_upstream_fields() {
        let raw = vec![RawHeadline {
            title: Some("Navy inducts new frigate".to_string()),
            description: Some("Latest stealth frigate joins the fleet".to_string()),
            url: Some("https://example.com/frigate".to_string()),
            url_to_image: Some("https://example.com/frigate.jpg".to_string()),
            source: Some(RawSourceRef {
                name: Some("PTI".to_string()),
            }),
            published_at: Some("2026-08-28T06:00:00Z".to_string()),
        }];

        let article = adapter().normalize(raw).remove(0);
        assert_eq!(article.category, Category::Defence);
        assert_eq!(article.source, "PTI");
        assert_eq!(article.url, "https://example.com/frigate");
        assert_eq!(article.image, "https://example.com/frigate.jpg");
        assert_eq!(article.date, "28 August 2026");
    }
}
