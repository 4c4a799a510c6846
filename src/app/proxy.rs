//! Defines an abstraction over the event sending mechanism.

use super::events::IngestEvent;
use tokio::sync::mpsc::UnboundedSender;

/// A trait that abstracts the sending of ingest events.
/// This is "fire-and-forget" and doesn't return a result: the worker must
/// never block waiting for the interactive surface to drain.
pub trait EventProxy: Send + Sync + Clone + 'static {
    fn send_event(&self, event: IngestEvent);
}

/// The default bridge: an unbounded single-consumer channel drained by the
/// interactive context's own loop. Per-sender FIFO ordering gives log lines
/// their end-to-end ordering guarantee.
impl EventProxy for UnboundedSender<IngestEvent> {
    fn send_event(&self, event: IngestEvent) {
        // Sending only fails when the receiver is gone, i.e. the surface is
        // shutting down. Drop the event and log it.
        if let Err(e) = self.send(event) {
            tracing::warn!("event channel closed, dropping event: {}", e);
        }
    }
}
