//! Incremental scan/apply loop.
//!
//! [`ScanController`] owns the productive-mode flag and labels every card the
//! collection reports as unprocessed. The `processed` marker is the only
//! idempotence guard: a card is classified at most once per activation, and a
//! card whose title has not rendered yet is left unmarked so a later pass
//! retries it.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

use crate::brain::ProductivityClassifier;
use crate::models::{combined_text, ItemId};

/// Period of the safety sweep that catches changes no notification reported.
pub const SAFETY_SCAN_INTERVAL: Duration = Duration::from_millis(700);

/// The live item collection as seen by the controller.
///
/// Lookups return `None` for unknown ids. Implementations keep markers wherever
/// the environment allows; [`crate::document::Document`] uses a side-table.
pub trait ItemCollection {
    /// Candidate items lacking the processed marker, in document order.
    fn query_unprocessed(&self) -> Vec<ItemId>;
    /// Title text, `None` while the item is still rendering.
    fn title(&self, id: ItemId) -> Option<&str>;
    /// Optional secondary metadata line.
    fn metadata(&self, id: ItemId) -> Option<&str>;
    /// Marks the item processed with the given verdict.
    fn set_markers(&mut self, id: ItemId, productive: bool);
    /// Every item currently carrying the processed marker.
    fn processed_items(&self) -> Vec<ItemId>;
    /// Removes both markers from the item.
    fn clear_markers(&mut self, id: ItemId);
    /// Exposes the mode to the environment (styling hook).
    fn set_active_attribute(&mut self, active: bool);
}

/// What caused a scan pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanTrigger {
    Activation,
    SafetyTimer,
    StructureChanged,
    NavigationFinished,
    Manual,
}

/// Outcome of a single pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    pub trigger: ScanTrigger,
    /// Items classified and marked during this pass
    pub classified: usize,
    /// Of those, items marked productive
    pub productive: usize,
    /// Items skipped because their title was missing
    pub deferred: usize,
}

impl ScanReport {
    fn new(trigger: ScanTrigger) -> Self {
        Self {
            trigger,
            classified: 0,
            productive: 0,
            deferred: 0,
        }
    }
}

/// Cumulative counters since the controller was created
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStats {
    pub passes: u64,
    pub classified: u64,
    pub productive: u64,
    pub deferred: u64,
    /// Number of deactivations that cleared markers
    pub resets: u64,
}

impl ScanStats {
    fn record(&mut self, report: &ScanReport) {
        self.passes += 1;
        self.classified += report.classified as u64;
        self.productive += report.productive as u64;
        self.deferred += report.deferred as u64;
    }
}

/// Result of [`ScanController::set_active`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "transition")]
pub enum ModeTransition {
    /// Mode switched on; carries the immediate pass.
    Activated { report: ScanReport },
    /// Mode switched off; `cleared` items lost their markers.
    Deactivated { cleared: usize },
    /// Requested mode equals the current one.
    Unchanged { active: bool },
}

enum ItemOutcome {
    Deferred,
    Classified { productive: bool },
}

/// Owns productive mode and drives classification of unprocessed items.
pub struct ScanController {
    classifier: ProductivityClassifier,
    active: bool,
    stats: ScanStats,
}

impl ScanController {
    pub fn new(classifier: ProductivityClassifier) -> Self {
        Self {
            classifier,
            active: false,
            stats: ScanStats::default(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn stats(&self) -> ScanStats {
        self.stats
    }

    pub fn classifier(&self) -> &ProductivityClassifier {
        &self.classifier
    }

    /// Switches productive mode.
    ///
    /// Activation runs one pass immediately. Deactivation clears both markers on
    /// every processed item so nothing stays revealed and the next activation
    /// starts from scratch. The environment attribute is re-asserted either way.
    pub fn set_active<C>(&mut self, enabled: bool, items: &mut C) -> ModeTransition
    where
        C: ItemCollection + ?Sized,
    {
        items.set_active_attribute(enabled);

        if enabled == self.active {
            return ModeTransition::Unchanged { active: enabled };
        }

        self.active = enabled;

        if enabled {
            info!("Productive mode enabled");
            let report = self.run_pass(ScanTrigger::Activation, items);
            ModeTransition::Activated { report }
        } else {
            let processed = items.processed_items();
            for id in &processed {
                items.clear_markers(*id);
            }
            self.stats.resets += 1;
            info!(cleared = processed.len(), "Productive mode disabled");
            ModeTransition::Deactivated {
                cleared: processed.len(),
            }
        }
    }

    /// Labels every unprocessed item. Returns `None` without touching the
    /// collection while productive mode is off.
    pub fn scan<C>(&mut self, trigger: ScanTrigger, items: &mut C) -> Option<ScanReport>
    where
        C: ItemCollection + ?Sized,
    {
        if !self.active {
            return None;
        }
        Some(self.run_pass(trigger, items))
    }

    fn run_pass<C>(&mut self, trigger: ScanTrigger, items: &mut C) -> ScanReport
    where
        C: ItemCollection + ?Sized,
    {
        let mut report = ScanReport::new(trigger);

        for id in items.query_unprocessed() {
            match self.process_item(id, items) {
                ItemOutcome::Deferred => report.deferred += 1,
                ItemOutcome::Classified { productive } => {
                    report.classified += 1;
                    if productive {
                        report.productive += 1;
                    }
                }
            }
        }

        self.stats.record(&report);
        if report.classified > 0 || report.deferred > 0 {
            debug!(
                trigger = ?trigger,
                classified = report.classified,
                productive = report.productive,
                deferred = report.deferred,
                "scan pass complete"
            );
        }
        report
    }

    fn process_item<C>(&self, id: ItemId, items: &mut C) -> ItemOutcome
    where
        C: ItemCollection + ?Sized,
    {
        let text = match items.title(id) {
            Some(title) => combined_text(title, items.metadata(id)),
            None => return ItemOutcome::Deferred,
        };

        let productive = self.classifier.evaluate(&text);
        items.set_markers(id, productive);
        ItemOutcome::Classified { productive }
    }
}
