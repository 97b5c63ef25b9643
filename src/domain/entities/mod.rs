pub mod notification;
pub mod toast;

pub use notification::{NewNotification, Notification, NotificationCategory};

pub use toast::{Toast, ToastAction, ToastKind, ToastRequest, DEFAULT_TOAST_DURATION};
