//! Productive-mode flag storage.
//!
//! The flag is a single boolean key, `productiveMode`, kept either in memory or in
//! a small JSON settings file. Every write is broadcast to subscribers. Writes by
//! other processes reach subscribers when the store is reloaded; writes replace
//! the file atomically so a reload never sees a half-written file.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tokio::sync::watch;
use tracing::{info, warn};

use crate::actors::traits::ModeSource;
use crate::error::AppError;

/// On-disk layout of the settings file
#[derive(Debug, Default, Serialize, Deserialize)]
struct ModeFile {
    #[serde(rename = "productiveMode", default, skip_serializing_if = "Option::is_none")]
    productive_mode: Option<bool>,
}

/// Holds the productive-mode flag and notifies subscribers of changes.
pub struct ModeStore {
    path: Option<PathBuf>,
    sender: watch::Sender<Option<bool>>,
}

impl ModeStore {
    /// A store that lives only as long as the process.
    pub fn in_memory(initial: Option<bool>) -> Self {
        let (sender, _) = watch::channel(initial);
        Self { path: None, sender }
    }

    /// Opens the settings file at `path`. A missing file means the flag was never set.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let path = path.into();
        let initial = read_flag(&path)?;
        let (sender, _) = watch::channel(initial);
        Ok(Self {
            path: Some(path),
            sender,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Current flag, `None` if never set.
    pub fn value(&self) -> Option<bool> {
        *self.sender.borrow()
    }

    /// Sets the flag, persisting it first when file-backed.
    pub fn set(&self, enabled: bool) -> Result<(), AppError> {
        self.write(Some(enabled))
    }

    /// Removes the key; readers fall back to "off".
    pub fn clear(&self) -> Result<(), AppError> {
        self.write(None)
    }

    /// Re-reads the settings file and notifies subscribers if the flag changed
    /// on disk. An empty file is mid-write by a foreign writer and is skipped.
    pub fn reload(&self) -> Result<Option<bool>, AppError> {
        let Some(path) = &self.path else {
            return Ok(self.value());
        };
        let value = match read_raw(path)? {
            None => None,
            Some(raw) if raw.trim().is_empty() => return Ok(self.value()),
            Some(raw) => parse_flag(&raw)?,
        };
        let changed = self.sender.send_if_modified(|current| {
            if *current == value {
                return false;
            }
            *current = value;
            true
        });
        if changed {
            info!(?value, "Productive mode flag changed on disk");
        }
        Ok(value)
    }

    fn write(&self, value: Option<bool>) -> Result<(), AppError> {
        if let Some(path) = &self.path {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            let body = serde_json::to_string_pretty(&ModeFile {
                productive_mode: value,
            })?;
            let staging = path.with_extension("json.tmp");
            fs::write(&staging, body)?;
            fs::rename(&staging, path)?;
        }
        self.sender.send_replace(value);
        info!(?value, "Productive mode flag updated");
        Ok(())
    }
}

fn read_raw(path: &Path) -> Result<Option<String>, AppError> {
    match fs::read_to_string(path) {
        Ok(raw) => Ok(Some(raw)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn parse_flag(raw: &str) -> Result<Option<bool>, AppError> {
    let file: ModeFile = serde_json::from_str(raw)?;
    Ok(file.productive_mode)
}

fn read_flag(path: &Path) -> Result<Option<bool>, AppError> {
    match read_raw(path)? {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => {
            warn!("Mode file {:?} is empty, treating flag as unset", path);
            Ok(None)
        }
        Some(raw) => parse_flag(&raw),
    }
}

#[async_trait]
impl ModeSource for ModeStore {
    async fn get(&self) -> Result<Option<bool>, AppError> {
        Ok(self.value())
    }

    fn subscribe(&self) -> watch::Receiver<Option<bool>> {
        self.sender.subscribe()
    }

    async fn refresh(&self) -> Result<(), AppError> {
        self.reload().map(|_| ())
    }
}
