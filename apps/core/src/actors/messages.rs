use serde::Serialize;
use tokio::sync::oneshot;

use crate::scanner::{ModeTransition, ScanReport, ScanStats};

/// Failures talking to the scanner actor.
#[derive(Debug, thiserror::Error, Serialize, Clone, PartialEq, Eq)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ActorError {
    /// The scanner has stopped; its mailbox no longer accepts messages.
    #[error("scanner mailbox closed: {0}")]
    MailboxClosed(String),
    /// The scanner dropped the reply channel without answering.
    #[error("scanner dropped the reply: {0}")]
    NoResponse(String),
}

// Re-export AppError for convenience
pub use crate::error::AppError;

/// Messages that can be sent to the scanner actor.
#[derive(Debug)]
pub enum ScannerMessage {
    /// Switch productive mode on or off.
    SetActive {
        enabled: bool,
        /// A channel to send the resulting transition back.
        responder: oneshot::Sender<Result<ModeTransition, AppError>>,
    },
    /// Run one discovery pass now.
    Scan {
        responder: oneshot::Sender<Result<Option<ScanReport>, AppError>>,
    },
    /// Read the cumulative scan counters.
    Stats {
        responder: oneshot::Sender<ScanStats>,
    },
    /// A command to stop the actor loop.
    Shutdown,
}
