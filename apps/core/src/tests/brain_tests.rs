//! Brain Module Tests
//!
//! Precedence rules of the productivity classifier over the built-in keyword
//! tiers, plus the titles the extension was tuned on.

use crate::brain::{
    Classification, KeywordSet, ProductivityClassifier, Rule, HARD_NEGATIVES,
    HARD_NEGATIVE_OVERRIDE_THRESHOLD, SOFT_NEGATIVES,
};

#[cfg(test)]
mod classifier_tests {
    use super::*;

    #[test]
    fn test_end_to_end_titles() {
        let classifier = ProductivityClassifier::new();

        let cases = vec![
            ("10 Minute Prank on my Roommate", false),
            ("React Crash Course movie app tutorial", true),
            ("Python Tutorial for Beginners", true),
            ("Arijit Singh New Audio Song", false),
            ("Random Bengaluru Street Food Vlog", false),
            ("Docker and Kubernetes Explained | DevOps Roadmap", true),
        ];

        for (title, expected) in cases {
            assert_eq!(
                classifier.evaluate(title),
                expected,
                "Unexpected verdict for '{}'",
                title
            );
        }
    }

    #[test]
    fn test_hard_negative_with_few_positives_is_hidden() {
        let classifier = ProductivityClassifier::new();

        let titles = vec![
            "10 Minute Prank on my Roommate",
            "Funny cat compilation",
            "Gaming highlights",
            "Vlog: my study routine",
            "Weekly comedy roast",
        ];

        for title in titles {
            let result = classifier.classify(title);
            assert!(!result.hard_negatives.is_empty(), "'{}' has no hard negative", title);
            assert!(result.positives.len() < HARD_NEGATIVE_OVERRIDE_THRESHOLD);
            assert!(!result.productive, "Expected hidden for '{}'", title);
            assert_eq!(result.rule, Rule::HardNegative);
        }
    }

    #[test]
    fn test_hard_negative_with_strong_positives_is_revealed() {
        let classifier = ProductivityClassifier::new();

        let result = classifier.classify("React Crash Course movie app tutorial");
        assert_eq!(result.hard_negatives, vec!["movie"]);
        assert!(result.positives.len() >= 3);
        assert!(result.positives.contains(&"react".to_string()));
        assert!(result.positives.contains(&"crash course".to_string()));
        assert!(result.positives.contains(&"tutorial".to_string()));
        assert_eq!(result.rule, Rule::HardNegativeOverridden);
        assert!(result.productive);
    }

    #[test]
    fn test_positive_beats_soft_negative() {
        let classifier = ProductivityClassifier::new();

        let result = classifier.classify("Python lyrics parser tutorial");
        assert!(!result.soft_negatives.is_empty());
        assert_eq!(result.rule, Rule::Positive);
        assert!(result.productive);
    }

    #[test]
    fn test_soft_negative_only_is_hidden() {
        let classifier = ProductivityClassifier::new();

        for title in ["Arijit Singh New Audio Song", "New BGM Jukebox", "Best Remix 2024"] {
            let result = classifier.classify(title);
            assert_eq!(result.rule, Rule::SoftNegative, "'{}'", title);
            assert!(!result.productive);
        }
    }

    #[test]
    fn test_unknown_content_is_hidden() {
        let classifier = ProductivityClassifier::new();

        for title in ["Cooking pasta at home", "Top 10 goals", "Lofi beats to relax"] {
            let result = classifier.classify(title);
            assert_eq!(result.rule, Rule::Unknown, "'{}'", title);
            assert!(!result.productive);
        }
    }

    #[test]
    fn test_empty_and_missing_text() {
        let classifier = ProductivityClassifier::new();

        assert!(!classifier.evaluate(""));
        assert!(!classifier.evaluate("   \t\n"));
        assert!(!classifier.evaluate_optional(None));
        assert_eq!(classifier.classify("").rule, Rule::Empty);
    }

    #[test]
    fn test_overlapping_keywords_are_matched_independently() {
        let classifier = ProductivityClassifier::new();

        // "reaction" also contains "react", "trailer" also contains "ai":
        // two positives outweigh the hard negatives.
        let result = classifier.classify("Movie Trailer Reaction");
        assert_eq!(result.positives, vec!["react", "ai"]);
        assert!(result.productive);
    }

    #[test]
    fn test_verdict_is_deterministic() {
        let classifier = ProductivityClassifier::new();
        let title = "Docker and Kubernetes Explained | DevOps Roadmap";

        let first: Classification = classifier.classify(title);
        let second = classifier.classify(title);
        assert_eq!(first, second);
        assert_eq!(classifier.evaluate(title), classifier.evaluate(title));
    }

    #[test]
    fn test_every_hard_negative_hides_bare_title() {
        let classifier = ProductivityClassifier::new();

        for keyword in HARD_NEGATIVES {
            let result = classifier.classify(keyword);
            assert!(!result.productive, "'{}' should be hidden", keyword);
            assert_eq!(result.rule, Rule::HardNegative, "'{}'", keyword);
        }

        // Incidental substring positives stay below the override threshold
        assert_eq!(classifier.classify("trailer").positives, vec!["ai"]);
        assert_eq!(classifier.classify("reaction").positives, vec!["react"]);
        assert!(classifier.classify("performance").positives.is_empty());
    }

    #[test]
    fn test_every_soft_negative_alone_is_hidden() {
        let classifier = ProductivityClassifier::new();
        let positives = KeywordSet::positives();

        for keyword in SOFT_NEGATIVES {
            if positives.any_in(keyword) {
                continue;
            }
            assert!(!classifier.evaluate(keyword), "'{}'", keyword);
        }
    }

    #[test]
    fn test_threshold_one_lets_single_positive_override() {
        let lenient = ProductivityClassifier::with_threshold(1);
        assert!(lenient.evaluate("Vlog: my study routine"));
        assert!(!ProductivityClassifier::new().evaluate("Vlog: my study routine"));
    }
}
