pub mod config;
pub mod events;
pub mod scheduler;

pub use config::BusConfig;
pub use events::BroadcastEventPublisher;
pub use scheduler::{TokioScheduler, VirtualScheduler};
