//! Common test utilities

#![allow(dead_code)]

use async_trait::async_trait;
use khabar::error::SourceError;
use khabar::models::{audience_tags, Article, Category, Snapshot};
use khabar::sources::NewsSource;
use khabar::store::SnapshotStore;
use std::path::PathBuf;
use std::sync::Arc;

/// Create a test article with default values
pub fn create_test_article(id: u32, title: &str, category: Category) -> Article {
    Article {
        id,
        title: title.to_string(),
        description: format!("{title} - description"),
        url: "https://example.com/article".to_string(),
        image: "https://example.com/article.jpg".to_string(),
        source: "Test Wire".to_string(),
        published_at: "2026-08-28T09:00:00Z".to_string(),
        date: "28 August 2026".to_string(),
        category,
        important_for: audience_tags(),
    }
}

/// Create a snapshot holding the given articles
pub fn create_test_snapshot(articles: Vec<Article>) -> Snapshot {
    Snapshot {
        articles,
        last_updated: Some("2026-08-28T09:00:00Z".to_string()),
        is_fallback: false,
    }
}

/// Create a store backed by a path inside a leaked temp dir
pub fn create_test_store() -> (Arc<SnapshotStore>, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("daily-news.json");
    std::mem::forget(dir);
    (Arc::new(SnapshotStore::new(path.clone())), path)
}

/// Source returning a fixed list of articles
pub struct FixedSource(pub Vec<Article>);

#[async_trait]
impl NewsSource for FixedSource {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn fetch(&self) -> Result<Vec<Article>, SourceError> {
        Ok(self.0.clone())
    }
}

/// Source that always times out
pub struct DeadSource;

#[async_trait]
impl NewsSource for DeadSource {
    fn name(&self) -> &str {
        "dead"
    }

    async fn fetch(&self) -> Result<Vec<Article>, SourceError> {
        Err(SourceError::Timeout)
    }
}
