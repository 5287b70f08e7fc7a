//! Text sanitization for feed-sourced descriptions
//!
//! Feed descriptions arrive as HTML fragments. Before an article enters the
//! common shape the markup is stripped, entities are decoded and whitespace
//! is normalized, then the result is truncated for display.

use regex::Regex;
use std::sync::LazyLock;

// Pre-compiled regex patterns for performance
static TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

static WHITESPACE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Strip markup from an HTML fragment and normalize whitespace
pub fn strip_markup(html: &str) -> String {
    let without_tags = TAG_REGEX.replace_all(html, "");
    let decoded = html_escape::decode_html_entities(&without_tags);
    WHITESPACE_REGEX.replace_all(&decoded, " ").trim().to_string()
}

/// Truncate text to `limit` characters, appending an ellipsis marker
///
/// The cut respects character boundaries, not bytes.
pub fn truncate_with_ellipsis(text: &str, limit: usize) -> String {
    let mut truncated: String = text.chars().take(limit).collect();
    truncated.push_str("...");
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_markup_removes_tags() {
        let html = "<p>Cabinet clears <b>new</b> policy</p>";
        assert_eq!(strip_markup(html), "Cabinet clears new policy");
    }

    #[test]
    fn test_strip_markup_decodes_entities() {
        assert_eq!(strip_markup("India&#39;s GDP &amp; trade"), "India's GDP & trade");
    }

    #[test]
    fn test_strip_markup_collapses_whitespace() {
        assert_eq!(strip_markup("a  b\n\n c"), "a b c");
    }

    #[test]
    fn test_strip_markup_plain_text_unchanged() {
        assert_eq!(strip_markup("no markup here"), "no markup here");
    }

    #[test]
    fn test_truncate_appends_ellipsis() {
        assert_eq!(truncate_with_ellipsis("short", 200), "short...");
        assert_eq!(truncate_with_ellipsis("abcdef", 3), "abc...");
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        // Devanagari chars are multi-byte; a byte-level cut would panic
        let text = "समाचार";
        assert_eq!(truncate_with_ellipsis(text, 3), "समा...");
    }
}
