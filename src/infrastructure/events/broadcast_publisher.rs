use crate::domain::{
    error::DomainResult,
    events::{BusEvent, EventPublisher},
};
use tokio::sync::broadcast;
use tracing::debug;

/// Fans bus events out to any number of subscribers.
///
/// Slow receivers that fall more than `capacity` events behind get a
/// `Lagged` error and skip ahead. With no subscribers the event is dropped.
pub struct BroadcastEventPublisher {
    tx: broadcast::Sender<BusEvent>,
}

impl BroadcastEventPublisher {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<BusEvent> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl EventPublisher for BroadcastEventPublisher {
    fn publish_event(&self, event: BusEvent) -> DomainResult<()> {
        debug!(
            event_type = event.event_type(),
            subscriber_count = self.tx.receiver_count(),
            "Bus event"
        );
        let _ = self.tx.send(event);
        Ok(())
    }
}
