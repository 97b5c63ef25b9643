pub mod bus_events;
pub mod publisher;

pub use bus_events::BusEvent;
pub use publisher::{DynEventPublisher, EventPublisher, NoopEventPublisher};

#[cfg(test)]
pub use publisher::MockEventPublisher;
