//! Operations behind the `focustube` subcommands. The binary parses arguments
//! and prints; everything observable lives here.

use chrono::Utc;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crate::actors::supervisor::SupervisorHandle;
use crate::brain::{Classification, ProductivityClassifier};
use crate::config::AppConfig;
use crate::document::SharedDocument;
use crate::error::AppError;
use crate::mode_store::ModeStore;
use crate::models::{Card, FeedReport};

/// Classifies free text with the configured override threshold.
pub fn classify(config: &AppConfig, words: &[String]) -> Classification {
    ProductivityClassifier::with_threshold(config.override_threshold).classify(&words.join(" "))
}

/// Reads a JSON array of cards.
pub fn load_feed(path: &Path) -> Result<Vec<Card>, AppError> {
    let raw = fs::read_to_string(path)?;
    let cards: Vec<Card> = serde_json::from_str(&raw)?;
    info!(cards = cards.len(), "Loaded feed");
    Ok(cards)
}

/// Labels `cards` the way a running page would.
///
/// The flag stored in the configured mode file decides whether cards are
/// labelled. `force` switches the scanner on for this run only; the stored flag
/// is left untouched.
pub async fn scan_feed(
    config: &AppConfig,
    cards: Vec<Card>,
    force: bool,
) -> Result<FeedReport, AppError> {
    let store = Arc::new(ModeStore::open(&config.mode_file)?);
    let document = SharedDocument::new();
    document.extend(cards)?;

    let supervisor = SupervisorHandle::start(config, document.clone(), store).await?;
    if force {
        supervisor.scanner().set_active(true).await?;
    }
    // Catch anything the activation pass deferred.
    let active = supervisor.scanner().scan().await?.is_some();
    let stats = supervisor.scanner().stats().await?;
    let cards = document.read(|doc| doc.card_states())?;
    supervisor.shutdown().await?;

    Ok(FeedReport {
        scanned_at: Utc::now(),
        active,
        stats,
        cards,
    })
}

/// Optionally changes the stored flag, then returns the effective mode.
pub fn set_mode(config: &AppConfig, value: Option<bool>) -> Result<bool, AppError> {
    let store = ModeStore::open(&config.mode_file)?;
    if let Some(enabled) = value {
        store.set(enabled)?;
    }
    Ok(store.value().unwrap_or(false))
}

pub fn mode_label(enabled: bool) -> &'static str {
    if enabled {
        "Enabled"
    } else {
        "Disabled"
    }
}
