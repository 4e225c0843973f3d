//! Actor System Tests
//!
//! Scanner actor behavior: mailbox messages, document events and the safety sweep.

use crate::actors::messages::AppError;
use crate::actors::scanner::ScannerHandle;
use crate::brain::ProductivityClassifier;
use crate::document::{Document, SharedDocument};
use crate::models::Card;
use crate::scanner::{ModeTransition, ScanTrigger};
use tokio::time::{sleep, Duration};

// ============================================================================
// Helpers
// ============================================================================

/// Long enough that the sweep never fires during a test.
const NO_SWEEP: Duration = Duration::from_secs(3600);
const FAST_SWEEP: Duration = Duration::from_millis(25);

fn spawn_scanner(document: &SharedDocument, sweep: Duration) -> ScannerHandle {
    ScannerHandle::spawn(document.clone(), ProductivityClassifier::new(), sweep)
}

/// Polls `check` for up to ~2s.
async fn wait_for<F>(document: &SharedDocument, check: F) -> bool
where
    F: Fn(&Document) -> bool,
{
    for _ in 0..200 {
        if document.read(|doc| check(doc)).unwrap() {
            return true;
        }
        sleep(Duration::from_millis(10)).await;
    }
    false
}

#[cfg(test)]
mod scanner_actor_tests {
    use super::*;

    #[tokio::test]
    async fn test_activation_labels_existing_cards() {
        let document = SharedDocument::new();
        let productive = document.insert(Card::new("Python Tutorial for Beginners")).unwrap();
        let prank = document.insert(Card::new("10 Minute Prank on my Roommate")).unwrap();
        let scanner = spawn_scanner(&document, NO_SWEEP);

        let transition = scanner.set_active(true).await.unwrap();
        match transition {
            ModeTransition::Activated { report } => {
                assert_eq!(report.trigger, ScanTrigger::Activation);
                assert_eq!(report.classified, 2);
            }
            other => panic!("expected activation, got {:?}", other),
        }

        document
            .read(|doc| {
                assert!(doc.is_revealed(productive));
                assert!(!doc.is_revealed(prank));
                assert!(doc.markers(prank).processed);
            })
            .unwrap();

        scanner.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_manual_scan_is_noop_while_inactive() {
        let document = SharedDocument::new();
        document.insert(Card::new("Linux Tutorial")).unwrap();
        let scanner = spawn_scanner(&document, NO_SWEEP);

        assert!(scanner.scan().await.unwrap().is_none());
        assert_eq!(document.read(|doc| doc.processed_count()).unwrap(), 0);
        assert_eq!(scanner.stats().await.unwrap().passes, 0);
    }

    #[tokio::test]
    async fn test_structure_change_triggers_scan_while_active() {
        let document = SharedDocument::new();
        let scanner = spawn_scanner(&document, NO_SWEEP);
        scanner.set_active(true).await.unwrap();

        let id = document
            .insert(Card::new("Docker and Kubernetes Explained | DevOps Roadmap"))
            .unwrap();

        assert!(wait_for(&document, |doc| doc.markers(id).processed).await);
        assert!(document.read(|doc| doc.is_revealed(id)).unwrap());
    }

    #[tokio::test]
    async fn test_structure_change_ignored_while_inactive() {
        let document = SharedDocument::new();
        let scanner = spawn_scanner(&document, NO_SWEEP);

        document.insert(Card::new("Python Tutorial for Beginners")).unwrap();
        sleep(Duration::from_millis(100)).await;

        assert_eq!(document.read(|doc| doc.processed_count()).unwrap(), 0);
        assert_eq!(scanner.stats().await.unwrap().passes, 0);
    }

    #[tokio::test]
    async fn test_navigation_triggers_scan() {
        let document = SharedDocument::new();
        let scanner = spawn_scanner(&document, NO_SWEEP);
        scanner.set_active(true).await.unwrap();

        let ids = document
            .navigate(vec![
                Card::new("History of Rome documentary"),
                Card::new("Random Bengaluru Street Food Vlog"),
            ])
            .unwrap();

        assert!(wait_for(&document, |doc| doc.processed_count() == 2).await);
        document
            .read(|doc| {
                assert!(doc.markers(ids[0]).productive);
                assert!(!doc.markers(ids[1]).productive);
            })
            .unwrap();
    }

    #[tokio::test]
    async fn test_safety_sweep_catches_silent_changes() {
        let document = SharedDocument::new();
        let scanner = spawn_scanner(&document, FAST_SWEEP);
        scanner.set_active(true).await.unwrap();

        // Mutate through the lock: no event is emitted.
        let id = document
            .lock()
            .unwrap()
            .insert(Card::new("Stock Market for Beginners"));

        assert!(wait_for(&document, |doc| doc.markers(id).processed).await);
        assert!(scanner.stats().await.unwrap().passes >= 2);
    }

    #[tokio::test]
    async fn test_safety_sweep_stops_after_deactivation() {
        let document = SharedDocument::new();
        let scanner = spawn_scanner(&document, FAST_SWEEP);
        scanner.set_active(true).await.unwrap();
        scanner.set_active(false).await.unwrap();

        let passes_before = scanner.stats().await.unwrap().passes;
        let id = document
            .lock()
            .unwrap()
            .insert(Card::new("Python Tutorial for Beginners"));
        sleep(FAST_SWEEP * 6).await;

        assert!(!document.read(|doc| doc.markers(id).processed).unwrap());
        assert_eq!(scanner.stats().await.unwrap().passes, passes_before);
    }

    #[tokio::test]
    async fn test_deactivation_clears_markers() {
        let document = SharedDocument::new();
        for title in ["Python Tutorial for Beginners", "Arijit Singh New Audio Song"] {
            document.insert(Card::new(title)).unwrap();
        }
        let scanner = spawn_scanner(&document, NO_SWEEP);

        scanner.set_active(true).await.unwrap();
        let transition = scanner.set_active(false).await.unwrap();
        assert_eq!(transition, ModeTransition::Deactivated { cleared: 2 });

        document
            .read(|doc| {
                assert_eq!(doc.processed_count(), 0);
                assert_eq!(doc.productive_count(), 0);
                assert_eq!(doc.active_attribute(), Some(false));
            })
            .unwrap();
    }

    #[tokio::test]
    async fn test_handle_fails_after_shutdown() {
        let document = SharedDocument::new();
        let scanner = spawn_scanner(&document, NO_SWEEP);

        scanner.shutdown().await.unwrap();
        sleep(Duration::from_millis(20)).await;

        let result = scanner.set_active(true).await;
        assert!(matches!(result, Err(AppError::Actor(_))));
    }
}
