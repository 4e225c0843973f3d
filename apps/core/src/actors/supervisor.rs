use crate::actors::messages::AppError;
use crate::actors::scanner::ScannerHandle;
use crate::actors::traits::ModeSource;
use crate::brain::ProductivityClassifier;
use crate::config::AppConfig;
use crate::document::SharedDocument;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Duration, Instant, MissedTickBehavior};
use tracing::{error, info, warn};

/// A handle to the running system.
///
/// Owns the scanner actor and the task that follows the mode source. This is the
/// primary entry point for the binary and the integration tests. Dropping the
/// handle stops both; `shutdown` does the same and waits for the scanner to
/// acknowledge.
pub struct SupervisorHandle {
    scanner: ScannerHandle,
    document: SharedDocument,
    mode_task: JoinHandle<()>,
}

impl SupervisorHandle {
    /// Starts the scanner over `document` and keeps it in sync with `mode`.
    ///
    /// The stored flag is read and applied before this returns; every later
    /// change is forwarded in order by a background task, which also asks the
    /// source to refresh itself once per safety interval. A missing flag means
    /// productive mode is off.
    pub async fn start<M: ModeSource>(
        config: &AppConfig,
        document: SharedDocument,
        mode: Arc<M>,
    ) -> Result<Self, AppError> {
        let classifier = ProductivityClassifier::with_threshold(config.override_threshold);
        let scanner = ScannerHandle::spawn(document.clone(), classifier, config.safety_interval());

        // Subscribe before reading so a change between the two is not lost.
        let mut changes = mode.subscribe();
        let _ = changes.borrow_and_update();

        let initial = match mode.get().await {
            Ok(value) => value.unwrap_or(false),
            Err(e) => {
                warn!("Failed to read productive mode, assuming off: {}", e);
                false
            }
        };
        if let Err(e) = scanner.set_active(initial).await {
            let _ = scanner.shutdown().await;
            return Err(e);
        }
        info!(active = initial, "Supervisor started");

        let mode_task = tokio::spawn(follow_mode(
            mode,
            changes,
            scanner.clone(),
            config.safety_interval(),
        ));

        Ok(Self {
            scanner,
            document,
            mode_task,
        })
    }

    pub fn scanner(&self) -> &ScannerHandle {
        &self.scanner
    }

    pub fn document(&self) -> &SharedDocument {
        &self.document
    }

    /// Stops following the mode source and shuts the scanner down.
    pub async fn shutdown(self) -> Result<(), AppError> {
        self.mode_task.abort();
        self.scanner.shutdown().await?;
        info!("Supervisor stopped");
        Ok(())
    }
}

impl Drop for SupervisorHandle {
    // The follow task holds the other scanner handle; once it is gone the
    // mailbox closes and the scanner exits.
    fn drop(&mut self) {
        self.mode_task.abort();
    }
}

async fn follow_mode<M: ModeSource>(
    mode: Arc<M>,
    mut changes: watch::Receiver<Option<bool>>,
    scanner: ScannerHandle,
    refresh_every: Duration,
) {
    let mut refresh = interval_at(Instant::now() + refresh_every, refresh_every);
    refresh.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            changed = changes.changed() => {
                if changed.is_err() {
                    break;
                }
                let enabled = changes.borrow_and_update().unwrap_or(false);
                apply(&scanner, enabled).await;
            }
            _ = refresh.tick() => {
                if let Err(e) = mode.refresh().await {
                    warn!("Failed to refresh productive mode: {}", e);
                }
            }
        }
    }
    info!("Mode source closed");
}

async fn apply(scanner: &ScannerHandle, enabled: bool) {
    if let Err(e) = scanner.set_active(enabled).await {
        error!("Failed to apply productive mode {}: {}", enabled, e);
    }
}
