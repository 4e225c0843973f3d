//! Productivity classification using tiered keyword matching.
//!
//! Pure substring matching, no ML model. Precedence:
//! 1. Hard negatives hide the item unless enough positives are present
//! 2. Any positive reveals the item
//! 3. Soft negatives and unknown content stay hidden

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use super::keywords::KeywordSet;

/// Number of distinct positive matches needed to override a hard negative
/// (e.g. "React movie app tutorial").
pub const HARD_NEGATIVE_OVERRIDE_THRESHOLD: usize = 2;

/// The precedence rule that decided a verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// Empty or missing text
    Empty,
    /// Hard negative without enough positive evidence
    HardNegative,
    /// Hard negative outweighed by positive evidence
    HardNegativeOverridden,
    /// At least one positive, no hard negative
    Positive,
    /// Only soft negatives matched
    SoftNegative,
    /// Nothing matched
    Unknown,
}

impl Rule {
    pub fn label(&self) -> &'static str {
        match self {
            Rule::Empty => "empty",
            Rule::HardNegative => "hard_negative",
            Rule::HardNegativeOverridden => "hard_negative_overridden",
            Rule::Positive => "positive",
            Rule::SoftNegative => "soft_negative",
            Rule::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Result of classifying one text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Final verdict
    pub productive: bool,
    /// Rule that produced the verdict
    pub rule: Rule,
    pub hard_negatives: Vec<String>,
    pub soft_negatives: Vec<String>,
    pub positives: Vec<String>,
}

impl Classification {
    fn empty() -> Self {
        Self {
            productive: false,
            rule: Rule::Empty,
            hard_negatives: Vec::new(),
            soft_negatives: Vec::new(),
            positives: Vec::new(),
        }
    }
}

/// Keyword-tier classifier. Cheap to clone and safe to share; holds no mutable state.
#[derive(Debug, Clone)]
pub struct ProductivityClassifier {
    hard_negatives: KeywordSet,
    soft_negatives: KeywordSet,
    positives: KeywordSet,
    override_threshold: usize,
}

impl Default for ProductivityClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductivityClassifier {
    /// Classifier over the built-in lists with the default override threshold
    pub fn new() -> Self {
        Self::with_threshold(HARD_NEGATIVE_OVERRIDE_THRESHOLD)
    }

    /// Classifier over the built-in lists with a custom override threshold
    pub fn with_threshold(override_threshold: usize) -> Self {
        Self::with_keywords(
            KeywordSet::hard_negatives(),
            KeywordSet::soft_negatives(),
            KeywordSet::positives(),
            override_threshold,
        )
    }

    /// Classifier over caller-supplied lists
    pub fn with_keywords(
        hard_negatives: KeywordSet,
        soft_negatives: KeywordSet,
        positives: KeywordSet,
        override_threshold: usize,
    ) -> Self {
        Self {
            hard_negatives,
            soft_negatives,
            positives,
            override_threshold,
        }
    }

    pub fn override_threshold(&self) -> usize {
        self.override_threshold
    }

    /// Returns `true` when `text` looks productive. Empty text is never productive.
    pub fn evaluate(&self, text: &str) -> bool {
        self.classify(text).productive
    }

    /// Same as [`evaluate`](Self::evaluate), treating missing text as empty.
    pub fn evaluate_optional(&self, text: Option<&str>) -> bool {
        text.map(|t| self.evaluate(t)).unwrap_or(false)
    }

    /// Classify `text` and report which rule and keywords decided it.
    pub fn classify(&self, text: &str) -> Classification {
        if text.trim().is_empty() {
            return Classification::empty();
        }

        let lower = text.to_lowercase();

        let positives = self.positives.matches_in(&lower);
        let hard_negatives = self.hard_negatives.matches_in(&lower);
        let soft_negatives = self.soft_negatives.matches_in(&lower);

        let (productive, rule) = if !hard_negatives.is_empty() {
            if positives.len() >= self.override_threshold {
                (true, Rule::HardNegativeOverridden)
            } else {
                (false, Rule::HardNegative)
            }
        } else if !positives.is_empty() {
            (true, Rule::Positive)
        } else if !soft_negatives.is_empty() {
            (false, Rule::SoftNegative)
        } else {
            (false, Rule::Unknown)
        };

        debug!(
            productive,
            rule = %rule,
            positives = positives.len(),
            hard_negatives = hard_negatives.len(),
            "classified text"
        );

        Classification {
            productive,
            rule,
            hard_negatives: hard_negatives.into_iter().map(str::to_string).collect(),
            soft_negatives: soft_negatives.into_iter().map(str::to_string).collect(),
            positives: positives.into_iter().map(str::to_string).collect(),
        }
    }
}
