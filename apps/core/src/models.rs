use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::scanner::ScanStats;

/// Opaque identity of a card in the live document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(Uuid);

impl ItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Structural category of a rendered card.
///
/// Only the video card layouts are scan candidates; everything else
/// (channel shelves, ads, chips) is `Other`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    /// New lockup layout used on home and search
    LockupView,
    /// Home feed grid item
    #[default]
    RichItem,
    /// Search result row
    VideoRenderer,
    /// Sidebar "up next" entry
    CompactVideo,
    /// Standalone thumbnail view
    ThumbnailView,
    Other,
}

impl CardKind {
    /// Whether cards of this kind are considered by the scanner.
    pub fn is_candidate(&self) -> bool {
        !matches!(self, CardKind::Other)
    }
}

/// Content of a single card as rendered.
///
/// `title` is `None` while the card is still rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    #[serde(default)]
    pub kind: CardKind,
    #[serde(default)]
    pub title: Option<String>,
    /// Secondary line (channel, views, age).
    #[serde(default)]
    pub metadata: Option<String>,
}

impl Card {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            kind: CardKind::default(),
            title: Some(title.into()),
            metadata: None,
        }
    }

    /// A card whose title has not rendered yet.
    pub fn pending() -> Self {
        Self::default()
    }

    pub fn with_metadata(mut self, metadata: impl Into<String>) -> Self {
        self.metadata = Some(metadata.into());
        self
    }

    pub fn with_kind(mut self, kind: CardKind) -> Self {
        self.kind = kind;
        self
    }
}

/// Per-item annotations kept in the document side-table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Markers {
    /// Classified since the last activation.
    pub processed: bool,
    /// Last verdict; meaningful only when `processed`.
    pub productive: bool,
}

/// A card and its markers, as reported to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardState {
    pub id: ItemId,
    pub kind: CardKind,
    pub title: Option<String>,
    pub metadata: Option<String>,
    pub processed: bool,
    pub productive: bool,
}

/// Outcome of scanning a feed, as printed by the `scan` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedReport {
    pub scanned_at: DateTime<Utc>,
    pub active: bool,
    pub stats: ScanStats,
    pub cards: Vec<CardState>,
}

/// Joins title and metadata into the text the classifier sees.
pub fn combined_text(title: &str, metadata: Option<&str>) -> String {
    format!("{} {}", title, metadata.unwrap_or("")).trim().to_string()
}
