use super::error::BotError;
use std::sync::Arc;

/// A handle to a running [Bot](super::Bot).
#[derive(Debug, Clone)]
pub struct BotInterface(pub(super) Arc<InterfaceData>);

#[derive(Debug)]
pub struct InterfaceData {
    pub(super) error_reporter: tokio::sync::mpsc::Sender<BotError>,
}

impl BotInterface {
    /// Stops the bot. Its `run` returns `Err(BotError::Close)`.
    pub async fn shutdown(self) {
        let _ = self.0.error_reporter.send(BotError::Close).await;
    }
}
