//! Snapshot store
//!
//! Holds exactly one current [`Snapshot`] in process memory, mirrored to a
//! single on-disk JSON record. The in-memory copy is replaced wholesale under
//! a write lock, so readers never observe a half-updated article list. The
//! disk record is overwritten on every successful aggregation run by writing
//! a temporary file and renaming it over the old one, so an interrupted
//! write never corrupts the last good record.

use std::fs;
use std::path::{Path, PathBuf};

use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::Result;
use crate::models::Snapshot;

/// In-memory snapshot with a durable single-file mirror
pub struct SnapshotStore {
    current: RwLock<Snapshot>,
    path: PathBuf,
}

impl SnapshotStore {
    /// Create an empty store backed by the given record path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            current: RwLock::new(Snapshot::default()),
            path: path.into(),
        }
    }

    /// Path of the persisted record
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Clone of the current snapshot
    pub async fn get(&self) -> Snapshot {
        self.current.read().await.clone()
    }

    /// Replace the current snapshot wholesale
    pub async fn replace(&self, snapshot: Snapshot) {
        *self.current.write().await = snapshot;
    }

    /// Read the persisted record, if any
    ///
    /// Returns `Ok(None)` when no record exists yet.
    pub fn load_from_disk(&self) -> Result<Option<Snapshot>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        let snapshot: Snapshot = serde_json::from_str(&content)?;
        Ok(Some(snapshot))
    }

    /// Overwrite the persisted record with the given snapshot
    ///
    /// Writes to a temporary sibling first and renames it into place.
    pub fn persist_to_disk(&self, snapshot: &Snapshot) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp = self.path.with_extension("json.tmp");
        let content = serde_json::to_string_pretty(snapshot)?;
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &self.path)?;

        debug!(path = %self.path.display(), articles = snapshot.articles.len(), "Snapshot persisted");
        Ok(())
    }

    /// Pre-populate memory from the persisted record at startup
    ///
    /// A record with an empty article list is ignored. Returns whether a
    /// snapshot was restored. The restored snapshot keeps whatever fallback
    /// flag was persisted and is replaced wholesale by the next live run,
    /// never merged.
    pub async fn restore(&self) -> Result<bool> {
        match self.load_from_disk()? {
            Some(snapshot) if !snapshot.articles.is_empty() => {
                info!(
                    articles = snapshot.articles.len(),
                    last_updated = ?snapshot.last_updated,
                    "Restored persisted snapshot"
                );
                self.replace(snapshot).await;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
