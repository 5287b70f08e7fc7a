//! Keyword-heuristic topic classification
//!
//! A pure, data-driven rule table maps free text onto the fixed taxonomy.
//! Rules are evaluated in order against the lowercased text and the first
//! rule with at least one matching keyword wins, so earlier (more specific)
//! categories preempt later ones. Matching is plain substring containment;
//! the trailing spaces in `"pm "`, `"us "`, `"un "` and `"ai "` are
//! deliberate, they keep those short tokens from firing inside longer words.

use crate::models::Category;

/// Ordered rule table; first match wins
const RULES: &[(Category, &[&str])] = &[
    (
        Category::Polity,
        &[
            "election",
            "parliament",
            "minister",
            "govt",
            "bill",
            "act",
            "pm ",
            "president",
            "lok sabha",
            "rajya sabha",
        ],
    ),
    (
        Category::Economy,
        &[
            "economy",
            "gdp",
            "inflation",
            "rbi",
            "bank",
            "budget",
            "market",
            "stock",
            "rupee",
            "tax",
            "finance",
        ],
    ),
    (
        Category::International,
        &[
            "china",
            "pakistan",
            "us ",
            "america",
            "bilateral",
            "summit",
            "g20",
            "g7",
            "un ",
            "nato",
            "russia",
            "diplomatic",
            "embassy",
        ],
    ),
    (
        Category::Science,
        &[
            "isro",
            "space",
            "rocket",
            "satellite",
            "mission",
            "scientist",
            "research",
            "tech",
            "ai ",
            "digital",
            "launch",
        ],
    ),
    (
        Category::Sports,
        &[
            "cricket",
            "ipl",
            "match",
            "team",
            "player",
            "sport",
            "olympic",
            "tournament",
            "medal",
            "bcci",
        ],
    ),
    (
        Category::Defence,
        &[
            "army",
            "military",
            "defence",
            "navy",
            "air force",
            "missile",
            "drone",
            "weapon",
            "soldier",
            "jawan",
        ],
    ),
    (
        Category::Awards,
        &[
            "award",
            "prize",
            "padma",
            "bharat ratna",
            "nobel",
            "honour",
            "recipient",
        ],
    ),
];

/// Classify free text into the fixed taxonomy
///
/// Pure and deterministic; case-insensitive. Returns [`Category::General`]
/// when no rule matches.
pub fn classify(text: &str) -> Category {
    let lower = text.to_lowercase();
    for (category, keywords) in RULES {
        if keywords.iter().any(|keyword| lower.contains(keyword)) {
            return *category;
        }
    }
    Category::General
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_match_wins_over_later_rules() {
        // "parliament" and "bill" fire before any economy keyword is checked
        assert_eq!(classify("Parliament passes new tax bill"), Category::Polity);
    }

    #[test]
    fn test_economy_without_polity_terms() {
        assert_eq!(
            classify("RBI holds repo rate as inflation eases"),
            Category::Economy
        );
    }

    #[test]
    fn test_awards_rule_fires() {
        assert_eq!(
            classify("Local bakery wins community award"),
            Category::Awards
        );
    }

    #[test]
    fn test_no_match_falls_back_to_general() {
        assert_eq!(classify("Monsoon arrives early in Kerala"), Category::General);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(classify("ISRO LAUNCHES NEW SATELLITE"), Category::Science);
    }

    #[test]
    fn test_trailing_space_tokens() {
        // "pm " must not fire inside e.g. "development"
        assert_eq!(classify("pm inaugurates expressway"), Category::Polity);
        assert_eq!(classify("rapid development in villages"), Category::General);
    }

    #[test]
    fn test_defence_before_awards() {
        assert_eq!(
            classify("Army jawan honoured with gallantry award"),
            Category::Defence
        );
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(classify(""), Category::General);
    }
}
