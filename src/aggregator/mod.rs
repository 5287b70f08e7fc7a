//! Aggregation pipeline orchestrator
//!
//! One run walks the fallback cascade: seed from the keyed headline API when
//! a credential is configured, consult the publisher feeds when that yields
//! too little, then deduplicate by title, cap the result and commit it as
//! the new snapshot. A failed run never touches the last good snapshot.
//!
//! Runs are serialized: the scheduler tick and a manual refresh share one
//! entry point, and an overlapping invocation waits for the in-flight run
//! instead of racing a second fetch cycle.

use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::Snapshot;
use crate::sources::{FeedSource, NewsApiSource, NewsSource};
use crate::store::SnapshotStore;

/// Snapshot cap after dedup
pub const MAX_ARTICLES: usize = 15;

/// Below this many keyed-API articles the feed adapter is consulted too
pub const FALLBACK_THRESHOLD: usize = 5;

/// Orchestrates source adapters into snapshot updates
pub struct Aggregator {
    /// Preferred source; absent when no credential is configured
    primary: Option<Box<dyn NewsSource>>,

    /// Fallback source, always configured
    secondary: Box<dyn NewsSource>,

    store: Arc<SnapshotStore>,

    /// Serializes runs; held for the whole fetch-and-commit cycle
    run_lock: Mutex<()>,
}

impl Aggregator {
    /// Build the production cascade from configuration
    pub fn from_config(config: &Config, store: Arc<SnapshotStore>) -> Result<Self> {
        let primary = match &config.api.key {
            Some(key) => Some(Box::new(NewsApiSource::new(
                key.as_str(),
                config.api.country.as_str(),
                config.api.page_size,
                config.request_timeout(),
            )?) as Box<dyn NewsSource>),
            None => None,
        };

        let secondary = Box::new(FeedSource::new(config.request_timeout())?);

        Ok(Self::new(primary, secondary, store))
    }

    /// Build an aggregator over explicit sources
    pub fn new(
        primary: Option<Box<dyn NewsSource>>,
        secondary: Box<dyn NewsSource>,
        store: Arc<SnapshotStore>,
    ) -> Self {
        Self {
            primary,
            secondary,
            store,
            run_lock: Mutex::new(()),
        }
    }

    /// The snapshot store this aggregator commits into
    pub fn store(&self) -> &Arc<SnapshotStore> {
        &self.store
    }

    /// Execute one aggregation run
    ///
    /// On success the snapshot is replaced atomically and mirrored to disk.
    /// Returns [`Error::NoArticles`] when every source came back empty; the
    /// existing snapshot is left untouched in that case.
    pub async fn run(&self) -> Result<Snapshot> {
        let _guard = self.run_lock.lock().await;

        info!("Starting aggregation run");
        let mut articles = Vec::new();

        if let Some(primary) = &self.primary {
            match primary.fetch().await {
                Ok(fetched) if !fetched.is_empty() => {
                    info!(source = primary.name(), count = fetched.len(), "Primary source fetched");
                    articles.extend(fetched);
                }
                Ok(_) => {
                    warn!(source = primary.name(), "Primary source returned no articles");
                }
                Err(err) => {
                    warn!(source = primary.name(), error = %err, "Primary source failed");
                }
            }
        }

        if articles.len() < FALLBACK_THRESHOLD {
            match self.secondary.fetch().await {
                Ok(fetched) => {
                    info!(source = self.secondary.name(), count = fetched.len(), "Fallback source fetched");
                    articles.extend(fetched);
                }
                Err(err) => {
                    warn!(source = self.secondary.name(), error = %err, "Fallback source failed");
                }
            }
        }

        let articles = dedup_and_cap(articles);
        if articles.is_empty() {
            warn!("No articles from any source; keeping previous snapshot");
            return Err(Error::NoArticles);
        }

        let snapshot = Snapshot {
            articles,
            last_updated: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
            is_fallback: false,
        };

        self.store.replace(snapshot.clone()).await;
        if let Err(err) = self.store.persist_to_disk(&snapshot) {
            // The in-memory snapshot is already live; persistence catches up
            // on the next successful run
            warn!(error = %err, "Failed to persist snapshot");
        }

        info!(count = snapshot.articles.len(), "Aggregation run complete");
        Ok(snapshot)
    }
}

/// Deduplicate by exact title (first occurrence wins), cap the list and
/// renumber ids so they are unique across the merged sources
fn dedup_and_cap(articles: Vec<crate::models::Article>) -> Vec<crate::models::Article> {
    let mut seen = std::collections::HashSet::new();
    let mut unique: Vec<_> = articles
        .into_iter()
        .filter(|article| seen.insert(article.title.clone()))
        .take(MAX_ARTICLES)
        .collect();

    for (idx, article) in unique.iter_mut().enumerate() {
        article.id = idx as u32 + 1;
    }

    unique
}
