//! khabar - current-affairs news aggregation service
//!
//! A periodic pipeline that polls external news sources, normalizes their
//! heterogeneous article shapes into one schema, classifies every article
//! into a fixed topic taxonomy with keyword heuristics, deduplicates, and
//! serves the resulting snapshot over a small JSON API.
//!
//! # Architecture
//!
//! - [`config`] - Configuration from environment variables or TOML
//! - [`models`] - Core data structures (articles, snapshots, taxonomy)
//! - [`categorizer`] - Pure keyword-rule topic classification
//! - [`sources`] - Adapters translating upstream shapes into the common one
//! - [`aggregator`] - Fallback cascade, dedup, snapshot commit
//! - [`store`] - In-memory snapshot with a durable JSON file mirror
//! - [`scheduler`] - Recurring refresh trigger
//! - [`server`] - HTTP query surface
//!
//! # Example
//!
//! ```no_run
//! use khabar::aggregator::Aggregator;
//! use khabar::config::Config;
//! use khabar::store::SnapshotStore;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let store = Arc::new(SnapshotStore::new(config.storage.snapshot_path.clone()));
//!     let aggregator = Aggregator::from_config(&config, store)?;
//!     let snapshot = aggregator.run().await?;
//!     println!("{} articles", snapshot.articles.len());
//!     Ok(())
//! }
//! ```

pub mod aggregator;
pub mod categorizer;
pub mod config;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod server;
pub mod sources;
pub mod store;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::aggregator::Aggregator;
    pub use crate::categorizer::classify;
    pub use crate::config::Config;
    pub use crate::error::{Error, Result, SourceError};
    pub use crate::models::{Article, Category, Snapshot};
    pub use crate::scheduler::Scheduler;
    pub use crate::sources::{FeedSource, NewsApiSource, NewsSource};
    pub use crate::store::SnapshotStore;
}
