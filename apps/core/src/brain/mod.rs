//! # Brain Module
//!
//! Fast, rule-based productivity classification for video cards.
//! Decides whether a card's title and metadata look productive BEFORE
//! the scanner reveals it.
//!
//! ## Components
//! - `keywords`: the three keyword tiers (hard negative, soft negative, positive)
//! - `classifier`: precedence rules turning keyword hits into a verdict

pub mod classifier;
pub mod keywords;

pub use classifier::{Classification, ProductivityClassifier, Rule, HARD_NEGATIVE_OVERRIDE_THRESHOLD};
pub use keywords::{KeywordCategory, KeywordSet, HARD_NEGATIVES, POSITIVE_KEYWORDS, SOFT_NEGATIVES};
