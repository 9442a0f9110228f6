use crate::core::connection::ClientSink;
use crate::core::registry::ConnectionRegistry;
use crate::domain::error::EchoResult;
use crate::domain::message::SerialMessage;
use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Receiving end of the serial line source. A terminal `Err` item ends relaying.
pub type LineStream = mpsc::UnboundedReceiver<EchoResult<SerialMessage>>;

/// Outcome of one broadcast cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    pub delivered: usize,
    pub failed: usize,
}

impl BroadcastReport {
    pub fn attempted(&self) -> usize {
        self.delivered + self.failed
    }
}

/// Fans each serial line out to every registered connection.
pub struct BroadcastRelay<C: ClientSink> {
    registry: Arc<ConnectionRegistry<C>>,
}

impl<C: ClientSink> BroadcastRelay<C> {
    pub fn new(registry: Arc<ConnectionRegistry<C>>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<ConnectionRegistry<C>> {
        &self.registry
    }

    /// Deliver one message to every connection in a fresh snapshot.
    ///
    /// Deliveries run concurrently and fail independently. A connection whose
    /// delivery fails is dropped from the registry; nothing is propagated.
    pub async fn broadcast(&self, message: &SerialMessage) -> BroadcastReport {
        let targets = self.registry.snapshot().await;
        if targets.is_empty() {
            debug!("No clients connected, dropping {} byte line", message.len());
            return BroadcastReport::default();
        }

        let attempts = targets
            .iter()
            .map(|client| async move { (client.id(), client.deliver(message).await) });
        let results = join_all(attempts).await;

        let mut report = BroadcastReport::default();
        for (id, result) in results {
            match result {
                Ok(()) => report.delivered += 1,
                Err(e) => {
                    warn!("Delivery to {} failed: {}", id, e);
                    report.failed += 1;
                    self.registry.remove(&id).await;
                }
            }
        }

        debug!(
            "Relayed {} byte line to {} of {} clients",
            message.len(),
            report.delivered,
            report.attempted()
        );
        report
    }

    /// Relay every line from `lines` until the source ends or reports an error.
    pub async fn run(&self, mut lines: LineStream) -> EchoResult<()> {
        while let Some(line) = lines.recv().await {
            let message = line?;
            self.broadcast(&message).await;
        }

        info!("Line source ended");
        Ok(())
    }
}
