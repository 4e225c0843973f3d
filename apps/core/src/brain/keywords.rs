//! Keyword tiers used by the productivity classifier.
//!
//! Three static lists drive classification:
//! - hard negatives: entertainment signals that only strong positive evidence can override
//! - soft negatives: ambiguous media signals that any positive evidence overrides
//! - positives: educational, technical and finance signals
//!
//! All entries are lowercase substrings, matched against lowercased text.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Entertainment / movie content. Overridable only by several positive hits.
pub const HARD_NEGATIVES: &[&str] = &[
    "prank",
    "vlog",
    "comedy",
    "funny",
    "roast",
    "reaction",
    "trailer",
    "teaser",
    "movie",
    "cinema",
    "highlights",
    "gameplay",
    "gaming",
    "dance",
    "performance",
    "t-series",
    "official video",
    "deleted scenes",
    "kollywood",
    "bollywood",
    "vijay",
    "ajith",
];

/// Ambiguous media content, hidden unless a positive keyword is present.
pub const SOFT_NEGATIVES: &[&str] = &[
    "audio",
    "video song",
    "lyrics",
    "remix",
    "jukebox",
    "bgm",
    "short",
];

/// Educational, technical, business and productivity content.
pub const POSITIVE_KEYWORDS: &[&str] = &[
    // Tech & programming
    "tutorial", "course", "coding", "programming", "python", "java", "javascript", "react",
    "node", "ai", "machine learning", "data science", "engineering", "cyber security",
    "cybersecurity", "data analyst", "roadmap", "web development", "algorithms", "software",
    "development", "backend", "frontend", "devops", "cloud", "docker", "kubernetes", "linux",
    "automation", "explained", "crash course", "website", "publish", "online", "free", "test",
    "bdd", "scenarios", "deploy", "architecture", "revit", "autocad", "design", "ux", "ui",
    "tool", "tech", "brotype", "cyber voyage", "katalon", "thiru", "ponmozhigal",
    // Finance, business & productivity
    "finance", "investing", "stock market", "trading", "rich dad poor dad", "business",
    "startup", "marketing", "economics", "productivity", "study", "career", "interview",
    "informative", "history", "documentary", "facts", "how to", "guide", "lesson", "science",
    "physics", "math", "chemistry", "biology", "education",
];

/// Keyword tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordCategory {
    HardNegative,
    SoftNegative,
    Positive,
}

impl fmt::Display for KeywordCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            KeywordCategory::HardNegative => "hard_negative",
            KeywordCategory::SoftNegative => "soft_negative",
            KeywordCategory::Positive => "positive",
        };
        write!(f, "{}", label)
    }
}

/// An immutable, ordered set of lowercase keywords belonging to one tier.
#[derive(Debug, Clone)]
pub struct KeywordSet {
    category: KeywordCategory,
    keywords: Vec<String>,
}

impl KeywordSet {
    /// Build a set from arbitrary keywords.
    ///
    /// Entries are lowercased and trimmed; empty entries and duplicates are dropped
    /// while the first occurrence keeps its position.
    pub fn new<I, S>(category: KeywordCategory, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .filter(|k| seen.insert(k.clone()))
            .collect();

        Self { category, keywords }
    }

    /// The built-in hard negative list
    pub fn hard_negatives() -> Self {
        Self::new(KeywordCategory::HardNegative, HARD_NEGATIVES)
    }

    /// The built-in soft negative list
    pub fn soft_negatives() -> Self {
        Self::new(KeywordCategory::SoftNegative, SOFT_NEGATIVES)
    }

    /// The built-in positive list
    pub fn positives() -> Self {
        Self::new(KeywordCategory::Positive, POSITIVE_KEYWORDS)
    }

    pub fn category(&self) -> KeywordCategory {
        self.category
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(String::as_str)
    }

    /// Whether any keyword occurs in `lowered`. The caller lowercases.
    pub fn any_in(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k.as_str()))
    }

    /// Every distinct keyword occurring in `lowered`, in list order.
    pub fn matches_in<'a>(&'a self, lowered: &str) -> Vec<&'a str> {
        self.keywords
            .iter()
            .filter(|k| lowered.contains(k.as_str()))
            .map(String::as_str)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_list_sizes() {
        assert_eq!(KeywordSet::hard_negatives().len(), 22);
        assert_eq!(KeywordSet::soft_negatives().len(), 7);
        assert_eq!(KeywordSet::positives().len(), 78);
    }

    #[test]
    fn test_builtin_lists_are_lowercase() {
        for set in [
            KeywordSet::hard_negatives(),
            KeywordSet::soft_negatives(),
            KeywordSet::positives(),
        ] {
            for keyword in set.iter() {
                assert_eq!(keyword, keyword.to_lowercase(), "{} in {}", keyword, set.category());
            }
        }
    }

    #[test]
    fn test_new_normalizes_and_dedupes() {
        let set = KeywordSet::new(
            KeywordCategory::Positive,
            ["Rust", "rust ", "", "  ", "Tokio", "RUST"],
        );

        let keywords: Vec<&str> = set.iter().collect();
        assert_eq!(keywords, vec!["rust", "tokio"]);
    }

    #[test]
    fn test_matches_in_counts_overlapping_keywords() {
        let set = KeywordSet::new(KeywordCategory::Positive, ["react", "ai", "course"]);

        // "reaction" contains "react", "trailer" contains "ai"
        let hits = set.matches_in("movie trailer reaction");
        assert_eq!(hits, vec!["react", "ai"]);
        assert!(set.any_in("crash course"));
        assert!(!set.any_in("street food"));
    }

    #[test]
    fn test_empty_set_matches_nothing() {
        let set = KeywordSet::new(KeywordCategory::SoftNegative, Vec::<String>::new());
        assert!(set.is_empty());
        assert!(!set.any_in("audio"));
        assert!(set.matches_in("audio").is_empty());
    }
}
