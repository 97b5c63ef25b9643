pub mod context;
pub mod notification_bus;

pub use notification_bus::{NotificationBus, NotificationBusBuilder};
