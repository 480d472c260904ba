//! Shutdown coordination.

use tokio::sync::broadcast;

/// Broadcasts a one-shot stop signal to long-running tasks.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Subscribe to the stop signal. Subscribe before triggering.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Signal every current subscriber to stop.
    pub fn trigger(&self) {
        // No subscribers simply means nothing is left to stop.
        let _ = self.tx.send(());
    }

    /// Trigger once Ctrl+C is received.
    pub fn trigger_on_ctrl_c(&self) -> tokio::task::JoinHandle<()> {
        let shutdown = self.clone();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    tracing::info!("Ctrl+C received, shutting down");
                    shutdown.trigger();
                }
                Err(e) => tracing::error!(error = %e, "Failed to install Ctrl+C handler"),
            }
        })
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
