use crate::actors::messages::AppError;
use async_trait::async_trait;
use tokio::sync::watch;

/// Defines the source of truth for productive mode.
///
/// This trait abstracts where the on/off flag lives (a settings file, a browser
/// storage area, memory), allowing the supervisor to follow any of them.
/// `None` means the flag was never set and is treated as off.
#[async_trait]
pub trait ModeSource: Send + Sync + 'static {
    /// Reads the current flag once, at startup.
    async fn get(&self) -> Result<Option<bool>, AppError>;

    /// Subscribes to every later change of the flag.
    fn subscribe(&self) -> watch::Receiver<Option<bool>>;

    /// Picks up changes made outside this process and publishes them to
    /// subscribers. Called periodically by the supervisor.
    async fn refresh(&self) -> Result<(), AppError> {
        Ok(())
    }
}
