//! # FocusTube Core
//!
//! Hides unproductive video cards and reveals productive ones.
//!
//! - [`brain`]: keyword tiers and the productivity classifier
//! - [`scanner`]: the incremental scan/apply state machine
//! - [`document`]: the live card collection with its marker side-table
//! - [`actors`]: the scanner actor and the supervisor wiring it to the mode store
//! - [`mode_store`]: the persisted productive-mode flag
//! - [`commands`]: the operations behind the `focustube` subcommands

pub mod actors;
pub mod brain;
pub mod commands;
pub mod config;
pub mod document;
pub mod error;
pub mod logging;
pub mod mode_store;
pub mod models;
pub mod scanner;

pub use actors::scanner::ScannerHandle;
pub use actors::supervisor::SupervisorHandle;
pub use brain::{Classification, ProductivityClassifier, Rule};
pub use config::AppConfig;
pub use document::{Document, DocumentEvent, SharedDocument};
pub use error::AppError;
pub use mode_store::ModeStore;
pub use models::{Card, CardKind, CardState, FeedReport, ItemId, Markers};
pub use scanner::{ItemCollection, ModeTransition, ScanController, ScanReport, ScanStats, ScanTrigger};

#[cfg(test)]
mod tests;
