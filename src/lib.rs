pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::{context, NotificationBus, NotificationBusBuilder};
pub use domain::{
    BusEvent, DomainError, DomainResult, NewNotification, Notification, NotificationCategory,
    Toast, ToastAction, ToastKind, ToastRequest,
};
pub use infrastructure::{BusConfig, TokioScheduler, VirtualScheduler};
