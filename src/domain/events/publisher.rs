use std::sync::Arc;

use super::BusEvent;
use crate::domain::error::DomainResult;

#[cfg(test)]
use mockall::automock;

/// Outbound seam for bus events. Publishing happens synchronously inside the
/// mutating call, after the new state is visible. Implementations must not
/// call back into the bus: some events are published under its locks.
#[cfg_attr(test, automock)]
pub trait EventPublisher: Send + Sync {
    fn publish_event(&self, event: BusEvent) -> DomainResult<()>;
}

pub type DynEventPublisher = Arc<dyn EventPublisher>;

#[derive(Default)]
pub struct NoopEventPublisher;

impl EventPublisher for NoopEventPublisher {
    fn publish_event(&self, _event: BusEvent) -> DomainResult<()> {
        Ok(())
    }
}

/// Publishes and logs a failure instead of propagating it; the store and the
/// queue never fail a data operation because an observer did.
pub(crate) fn publish_or_warn(publisher: &dyn EventPublisher, event: BusEvent) {
    let event_type = event.event_type();
    if let Err(error) = publisher.publish_event(event) {
        tracing::warn!(event_type, %error, "Failed to publish bus event");
    }
}
