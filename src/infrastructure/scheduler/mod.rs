pub mod tokio_scheduler;
pub mod virtual_scheduler;

pub use tokio_scheduler::TokioScheduler;
pub use virtual_scheduler::VirtualScheduler;
