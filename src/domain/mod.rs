pub mod entities;
pub mod error;
pub mod events;
pub mod services;

pub use entities::{
    NewNotification, Notification, NotificationCategory, Toast, ToastAction, ToastKind,
    ToastRequest,
};

pub use error::{DomainError, DomainResult};

pub use events::{BusEvent, DynEventPublisher, EventPublisher};

pub use services::{DynScheduler, NotificationStore, Scheduler, TaskHandle, ToastQueue};
