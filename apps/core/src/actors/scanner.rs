use crate::actors::messages::{ActorError, AppError, ScannerMessage};
use crate::brain::ProductivityClassifier;
use crate::document::{DocumentEvent, SharedDocument};
use crate::scanner::{ModeTransition, ScanController, ScanReport, ScanStats, ScanTrigger};
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::time::{interval_at, timeout, Duration, Instant, Interval, MissedTickBehavior};
use tracing::{debug, error, info, instrument, warn};

/// How long a caller waits for the scanner to answer.
const RESPONSE_TIMEOUT: Duration = Duration::from_secs(5);

/// A handle to the scanner actor.
///
/// The actor is the only place where productive mode, the markers and the
/// safety timer change. Every trigger is handled to completion before the next
/// one is looked at.
#[derive(Clone)]
pub struct ScannerHandle {
    sender: mpsc::Sender<ScannerMessage>,
}

impl ScannerHandle {
    /// Spawns the scanner actor over `document` and returns a handle to it.
    ///
    /// # Arguments
    ///
    /// * `document` - The live document to label.
    /// * `classifier` - The classifier applied to each unprocessed card.
    /// * `safety_interval` - Period of the safety sweep while active.
    pub fn spawn(
        document: SharedDocument,
        classifier: ProductivityClassifier,
        safety_interval: Duration,
    ) -> Self {
        let (sender, receiver) = mpsc::channel(32);
        let runner = ScannerRunner::new(receiver, document, classifier, safety_interval);
        tokio::spawn(async move { runner.run().await });
        Self { sender }
    }

    /// Switches productive mode on or off.
    #[instrument(skip(self))]
    pub async fn set_active(&self, enabled: bool) -> Result<ModeTransition, AppError> {
        let (send, recv) = oneshot::channel();
        self.send(ScannerMessage::SetActive {
            enabled,
            responder: send,
        })
        .await?;
        timeout(RESPONSE_TIMEOUT, recv)
            .await?
            .map_err(|e| ActorError::NoResponse(e.to_string()))?
    }

    /// Runs one discovery pass now. `None` while productive mode is off.
    #[instrument(skip(self))]
    pub async fn scan(&self) -> Result<Option<ScanReport>, AppError> {
        let (send, recv) = oneshot::channel();
        self.send(ScannerMessage::Scan { responder: send }).await?;
        timeout(RESPONSE_TIMEOUT, recv)
            .await?
            .map_err(|e| ActorError::NoResponse(e.to_string()))?
    }

    /// Reads the cumulative scan counters.
    pub async fn stats(&self) -> Result<ScanStats, AppError> {
        let (send, recv) = oneshot::channel();
        self.send(ScannerMessage::Stats { responder: send }).await?;
        let stats = timeout(RESPONSE_TIMEOUT, recv)
            .await?
            .map_err(|e| ActorError::NoResponse(e.to_string()))?;
        Ok(stats)
    }

    /// Stops the actor. Pending messages after this one are dropped.
    pub async fn shutdown(&self) -> Result<(), AppError> {
        self.send(ScannerMessage::Shutdown).await
    }

    async fn send(&self, msg: ScannerMessage) -> Result<(), AppError> {
        self.sender
            .send(msg)
            .await
            .map_err(|e| ActorError::MailboxClosed(e.to_string()).into())
    }
}

/// What woke the actor up
enum Wake {
    Message(Option<ScannerMessage>),
    Document(Result<DocumentEvent, broadcast::error::RecvError>),
    SafetyTick,
}

// --- Actor Runner ---
struct ScannerRunner {
    receiver: mpsc::Receiver<ScannerMessage>,
    events: broadcast::Receiver<DocumentEvent>,
    document: SharedDocument,
    controller: ScanController,
    safety_interval: Duration,
    /// Present only while productive mode is on.
    safety_sweep: Option<Interval>,
}

impl ScannerRunner {
    fn new(
        receiver: mpsc::Receiver<ScannerMessage>,
        document: SharedDocument,
        classifier: ProductivityClassifier,
        safety_interval: Duration,
    ) -> Self {
        Self {
            receiver,
            events: document.subscribe(),
            document,
            controller: ScanController::new(classifier),
            safety_interval,
            safety_sweep: None,
        }
    }

    async fn run(mut self) {
        info!("Scanner started");
        loop {
            let wake = tokio::select! {
                msg = self.receiver.recv() => Wake::Message(msg),
                event = self.events.recv() => Wake::Document(event),
                _ = next_tick(&mut self.safety_sweep) => Wake::SafetyTick,
            };

            match wake {
                Wake::Message(None) | Wake::Message(Some(ScannerMessage::Shutdown)) => break,
                Wake::Message(Some(msg)) => self.handle_message(msg),
                Wake::Document(Ok(DocumentEvent::StructureChanged)) => {
                    self.scan_logged(ScanTrigger::StructureChanged)
                }
                Wake::Document(Ok(DocumentEvent::NavigationFinished)) => {
                    self.scan_logged(ScanTrigger::NavigationFinished)
                }
                Wake::Document(Err(broadcast::error::RecvError::Lagged(skipped))) => {
                    debug!(skipped, "document events lagged, rescanning");
                    self.scan_logged(ScanTrigger::StructureChanged)
                }
                Wake::Document(Err(broadcast::error::RecvError::Closed)) => {
                    warn!("Document event channel closed");
                    break;
                }
                Wake::SafetyTick => self.scan_logged(ScanTrigger::SafetyTimer),
            }
        }
        self.safety_sweep = None;
        info!("Scanner stopped");
    }

    fn handle_message(&mut self, msg: ScannerMessage) {
        match msg {
            ScannerMessage::SetActive { enabled, responder } => {
                let result = self.set_active(enabled);
                if let Err(e) = &result {
                    error!("Error switching productive mode: {:?}", e);
                }
                let _ = responder.send(result);
            }
            ScannerMessage::Scan { responder } => {
                let result = self.scan(ScanTrigger::Manual);
                if let Err(e) = &result {
                    error!("Error scanning document: {:?}", e);
                }
                let _ = responder.send(result);
            }
            ScannerMessage::Stats { responder } => {
                let _ = responder.send(self.controller.stats());
            }
            // Handled by the run loop
            ScannerMessage::Shutdown => {}
        }
    }

    fn set_active(&mut self, enabled: bool) -> Result<ModeTransition, AppError> {
        let transition = {
            let mut doc = self.document.lock()?;
            self.controller.set_active(enabled, &mut *doc)
        };

        if self.controller.is_active() {
            if self.safety_sweep.is_none() {
                self.safety_sweep = Some(self.new_sweep());
            }
        } else {
            self.safety_sweep = None;
        }

        Ok(transition)
    }

    fn scan(&mut self, trigger: ScanTrigger) -> Result<Option<ScanReport>, AppError> {
        if !self.controller.is_active() {
            return Ok(None);
        }
        let mut doc = self.document.lock()?;
        Ok(self.controller.scan(trigger, &mut *doc))
    }

    fn scan_logged(&mut self, trigger: ScanTrigger) {
        if let Err(e) = self.scan(trigger) {
            error!("Error during {:?} scan: {:?}", trigger, e);
        }
    }

    /// The first tick fires one period from now; activation already scanned.
    fn new_sweep(&self) -> Interval {
        let mut sweep = interval_at(Instant::now() + self.safety_interval, self.safety_interval);
        sweep.set_missed_tick_behavior(MissedTickBehavior::Skip);
        sweep
    }
}

async fn next_tick(sweep: &mut Option<Interval>) {
    match sweep {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}
