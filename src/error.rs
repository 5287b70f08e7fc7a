//! Unified error handling for the khabar crate
//!
//! Failures are split into two layers, mirroring how they propagate through
//! the pipeline:
//!
//! - [`SourceError`] - a single upstream (the keyed headline API, or one feed
//!   inside the feed adapter) failed. These are recovered at the aggregator:
//!   logged and treated as zero articles from that source.
//! - [`Error`] - the unified crate error. The only pipeline-level failure is
//!   [`Error::NoArticles`], raised when every configured source came back
//!   empty in one run. It never crosses the HTTP boundary; the previous
//!   snapshot stays authoritative.

use std::io;
use thiserror::Error;

/// Errors from a single upstream source
#[derive(Error, Debug)]
pub enum SourceError {
    /// HTTP request error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Request timeout
    #[error("Request timeout")]
    Timeout,

    /// Upstream responded but the payload was not in the expected shape
    #[error("Malformed response from {source_name}: {reason}")]
    MalformedResponse { source_name: String, reason: String },
}

impl SourceError {
    /// Check if this error is transient and worth retrying on a later run
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Http(_) | Self::Timeout => true,
            Self::MalformedResponse { .. } => false,
        }
    }

    /// Create a malformed-response error
    pub fn malformed(source: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            source_name: source.into(),
            reason: reason.into(),
        }
    }
}

/// Unified error type for the khabar crate
#[derive(Error, Debug)]
pub enum Error {
    /// A single source failed
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Every configured source failed or returned zero usable articles
    #[error("No articles available from any source")]
    NoArticles,

    /// I/O errors (snapshot persistence)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP client errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Check if this error is transient (a later scheduled run may succeed)
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Source(e) => e.is_recoverable(),
            Self::NoArticles => true,
            Self::Io(_) => true,
            Self::Http(_) => true,
            Self::Json(_) => false,
            Self::Config(_) => false,
        }
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
