//! Shutdown coordination for the redirector.

use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::pipeline::Effect;

/// Coordinator for process shutdown.
///
/// Provides a broadcast channel that the server loop subscribes to. Both
/// Ctrl-C and an authorized halt request end up in [`Shutdown::trigger`].
#[derive(Debug, Clone)]
pub struct Shutdown {
    /// Broadcast channel sender.
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    /// Create a new shutdown coordinator.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Subscribe to the shutdown signal.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Trigger the shutdown signal.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }

    /// Get the number of active subscribers (tasks still running).
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Trigger the shutdown signal once `after` has elapsed.
    ///
    /// Gives the halt response time to reach the client before the
    /// listener goes away.
    pub fn schedule(&self, after: Duration) -> JoinHandle<()> {
        let this = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(after).await;
            tracing::info!(subscribers = this.receiver_count(), "End of session");
            this.trigger();
        })
    }

    /// Carry out an effect requested by the pipeline.
    pub fn apply(&self, effect: Effect) {
        match effect {
            Effect::Shutdown { after } => {
                tracing::debug!(delay_ms = after.as_millis() as u64, "Shutdown scheduled");
                self.schedule(after);
            }
        }
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
