//! Shutdown signaling for the cycle worker and pending phase waiters.

use tokio::sync::watch;

/// Sender half of the shutdown channel.
///
/// Cloneable so that multiple components can request shutdown of the same
/// controller.
#[derive(Debug, Clone)]
pub struct ShutdownTx(watch::Sender<()>);

impl ShutdownTx {
    /// Broadcasts the shutdown signal to all receivers.
    pub fn shutdown(&self) -> Result<(), watch::error::SendError<()>> {
        self.0.send(())
    }

    /// Creates a new receiver observing this sender.
    ///
    /// A receiver obtained here only resolves for signals sent *after* it was
    /// created; to observe an earlier signal, clone a receiver that existed
    /// before the signal was sent.
    pub fn subscribe(&self) -> ShutdownRx {
        self.0.subscribe()
    }
}

/// Receiver half of the shutdown channel.
pub type ShutdownRx = watch::Receiver<()>;

/// Creates a new pair of [`ShutdownTx`] and [`ShutdownRx`].
pub fn create_shutdown_channel() -> (ShutdownTx, ShutdownRx) {
    let (tx, rx) = watch::channel(());

    (ShutdownTx(tx), rx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_shutdown_reaches_receivers_cloned_before_the_signal() {
        let (tx, rx) = create_shutdown_channel();
        let mut rx_clone = rx.clone();

        tx.shutdown().unwrap();

        rx_clone.changed().await.unwrap();
    }

    #[tokio::test]
    async fn test_shutdown_reaches_multiple_receivers() {
        let (tx, mut rx) = create_shutdown_channel();
        let mut subscribed = tx.subscribe();

        tx.shutdown().unwrap();

        rx.changed().await.unwrap();
        subscribed.changed().await.unwrap();
    }
}
