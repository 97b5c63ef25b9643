pub mod notification_store;
pub mod scheduler;
pub mod toast_queue;

pub use notification_store::{NotificationList, NotificationStore};
pub use scheduler::{DynScheduler, ScheduledTask, Scheduler, TaskHandle};
pub use toast_queue::{ToastList, ToastQueue};
