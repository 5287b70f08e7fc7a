// Core data structures for the khabar aggregation pipeline

use chrono::DateTime;
use serde::{Deserialize, Serialize};

/// Exam-audience tags attached to every article
///
/// Constant across all articles for now; kept per-article for forward
/// compatibility with per-audience relevance scoring.
pub const AUDIENCE_TAGS: &[&str] = &["SSC", "Banking", "UPSC", "Railways"];

/// Fixed rotation of placeholder images used when a source provides none
const PLACEHOLDER_IMAGES: &[&str] = &[
    "https://images.unsplash.com/photo-1504711434969-e33886168f5c?w=400&h=300&fit=crop",
    "https://images.unsplash.com/photo-1495020689067-958852a7765e?w=400&h=300&fit=crop",
    "https://images.unsplash.com/photo-1585829365295-ab7cd400c167?w=400&h=300&fit=crop",
    "https://images.unsplash.com/photo-1551288049-bebda4e38f71?w=400&h=300&fit=crop",
    "https://images.unsplash.com/photo-1529107386315-e1a2ed48a620?w=400&h=300&fit=crop",
];

/// Pick a placeholder image deterministically from the fixed rotation
pub fn placeholder_image(index: usize) -> &'static str {
    PLACEHOLDER_IMAGES[index % PLACEHOLDER_IMAGES.len()]
}

/// Topic taxonomy. Closed set; every article carries exactly one label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Polity,
    Economy,
    International,
    Science,
    Sports,
    Defence,
    Awards,
    General,
}

impl Category {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Polity => "Polity",
            Self::Economy => "Economy",
            Self::International => "International",
            Self::Science => "Science",
            Self::Sports => "Sports",
            Self::Defence => "Defence",
            Self::Awards => "Awards",
            Self::General => "General",
        }
    }

    /// Create from string
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Polity" => Some(Self::Polity),
            "Economy" => Some(Self::Economy),
            "International" => Some(Self::International),
            "Science" => Some(Self::Science),
            "Sports" => Some(Self::Sports),
            "Defence" => Some(Self::Defence),
            "Awards" => Some(Self::Awards),
            "General" => Some(Self::General),
            _ => None,
        }
    }

    /// Get all taxonomy labels
    pub fn all() -> Vec<Self> {
        vec![
            Self::Polity,
            Self::Economy,
            Self::International,
            Self::Science,
            Self::Sports,
            Self::Defence,
            Self::Awards,
            Self::General,
        ]
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized news article, the common shape all adapters map into
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    /// Unique within one snapshot; reassigned on every aggregation run
    pub id: u32,
    pub title: String,
    pub description: String,
    pub url: String,
    pub image: String,
    pub source: String,
    /// Origin timestamp as reported by the source; may be malformed
    #[serde(rename = "publishedAt")]
    pub published_at: String,
    /// Display rendering of `published_at` ("28 August 2026"); empty when
    /// the origin timestamp does not parse
    pub date: String,
    pub category: Category,
    #[serde(rename = "importantFor")]
    pub important_for: Vec<String>,
}

/// The queryable state: the complete article set plus run metadata.
/// Replaced atomically as a whole; also the shape of the persisted record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(rename = "data")]
    pub articles: Vec<Article>,
    #[serde(rename = "lastUpdated")]
    pub last_updated: Option<String>,
    /// True when the snapshot came from a degraded/backup path rather than
    /// live sources
    #[serde(rename = "isMock", default)]
    pub is_fallback: bool,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            articles: Vec::new(),
            last_updated: None,
            is_fallback: false,
        }
    }
}

impl Snapshot {
    /// Distinct categories present in the snapshot, in first-appearance order
    pub fn categories(&self) -> Vec<Category> {
        let mut seen = Vec::new();
        for article in &self.articles {
            if !seen.contains(&article.category) {
                seen.push(article.category);
            }
        }
        seen
    }
}

/// Render an origin timestamp as "{day} {LongMonth} {year}" for display
///
/// Accepts RFC 3339 (keyed API) and RFC 2822 (feed `pubDate`) timestamps.
/// Fails soft: a malformed timestamp yields an empty string, never an error.
pub fn display_date(published_at: &str) -> String {
    let parsed = DateTime::parse_from_rfc3339(published_at)
        .or_else(|_| DateTime::parse_from_rfc2822(published_at));

    match parsed {
        Ok(dt) => dt.format("%-d %B %Y").to_string(),
        Err(_) => String::new(),
    }
}

/// Default audience tags as owned strings, ready to attach to an article
pub fn audience_tags() -> Vec<String> {
    AUDIENCE_TAGS.iter().map(|t| t.to_string()).collect()
}
