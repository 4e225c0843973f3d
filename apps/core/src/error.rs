use std::io;
use thiserror::Error;

use crate::actors::messages::ActorError;

/// Every failure the library reports.
///
/// Classification itself never fails; these cover the plumbing around it: the
/// settings and feed files, the shared document, the scanner actor and startup
/// configuration.
#[derive(Debug, Error)]
pub enum AppError {
    /// Reading or writing the mode file or a feed file failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The scanner actor could not be reached or did not answer.
    #[error("Actor error: {0}")]
    Actor(#[from] ActorError),

    /// Input that parsed but is not acceptable (malformed JSON, out-of-range settings).
    #[error("Validation error: {0}")]
    Validation(String),

    /// An environment variable could not be parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The shared document lock was poisoned by a panicking holder.
    #[error("Document unavailable: {0}")]
    DocumentPoisoned(String),

    /// A bug or an environment problem outside the crate's control.
    #[error("Internal error: {0}")]
    Internal(String),

    /// A caller gave up waiting.
    #[error("Operation timed out: {0}")]
    Timeout(String),
}

// io::Error is not Clone; rebuild it from kind and message.
impl Clone for AppError {
    fn clone(&self) -> Self {
        match self {
            Self::Io(e) => Self::Io(io::Error::new(e.kind(), e.to_string())),
            Self::Actor(e) => Self::Actor(e.clone()),
            Self::Validation(msg) => Self::Validation(msg.clone()),
            Self::Config(msg) => Self::Config(msg.clone()),
            Self::DocumentPoisoned(msg) => Self::DocumentPoisoned(msg.clone()),
            Self::Internal(msg) => Self::Internal(msg.clone()),
            Self::Timeout(msg) => Self::Timeout(msg.clone()),
        }
    }
}

impl From<tokio::time::error::Elapsed> for AppError {
    fn from(err: tokio::time::error::Elapsed) -> Self {
        Self::Timeout(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::Validation(format!("invalid JSON at line {}: {}", err.line(), err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::Validation(format!("settings out of range: {}", err))
    }
}

impl<T> From<std::sync::PoisonError<T>> for AppError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        Self::DocumentPoisoned(err.to_string())
    }
}
