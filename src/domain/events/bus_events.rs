use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::{NotificationCategory, ToastKind};

/// State changes announced by the bus. Only effective changes are published;
/// a no-op on an unknown id produces no event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum BusEvent {
    NotificationAdded {
        notification_id: Uuid,
        category: NotificationCategory,
        title: String,
        created_at: DateTime<Utc>,
    },
    NotificationRead {
        notification_id: Uuid,
        read_at: DateTime<Utc>,
    },
    AllNotificationsRead {
        count: usize,
        read_at: DateTime<Utc>,
    },
    NotificationDeleted {
        notification_id: Uuid,
        deleted_at: DateTime<Utc>,
    },
    NotificationsCleared {
        count: usize,
        cleared_at: DateTime<Utc>,
    },
    ToastShown {
        toast_id: Uuid,
        kind: ToastKind,
        duration_ms: u64,
        shown_at: DateTime<Utc>,
    },
    ToastDismissed {
        toast_id: Uuid,
        dismissed_at: DateTime<Utc>,
    },
    ToastExpired {
        toast_id: Uuid,
        expired_at: DateTime<Utc>,
    },
}

impl BusEvent {
    pub fn notification_read(notification_id: Uuid) -> Self {
        Self::NotificationRead {
            notification_id,
            read_at: Utc::now(),
        }
    }

    pub fn all_notifications_read(count: usize) -> Self {
        Self::AllNotificationsRead {
            count,
            read_at: Utc::now(),
        }
    }

    pub fn notification_deleted(notification_id: Uuid) -> Self {
        Self::NotificationDeleted {
            notification_id,
            deleted_at: Utc::now(),
        }
    }

    pub fn notifications_cleared(count: usize) -> Self {
        Self::NotificationsCleared {
            count,
            cleared_at: Utc::now(),
        }
    }

    pub fn toast_dismissed(toast_id: Uuid) -> Self {
        Self::ToastDismissed {
            toast_id,
            dismissed_at: Utc::now(),
        }
    }

    pub fn toast_expired(toast_id: Uuid) -> Self {
        Self::ToastExpired {
            toast_id,
            expired_at: Utc::now(),
        }
    }

    /// Dot-namespaced name, handy as a log field.
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::NotificationAdded { .. } => "notification.added",
            Self::NotificationRead { .. } => "notification.read",
            Self::AllNotificationsRead { .. } => "notification.all_read",
            Self::NotificationDeleted { .. } => "notification.deleted",
            Self::NotificationsCleared { .. } => "notification.cleared",
            Self::ToastShown { .. } => "toast.shown",
            Self::ToastDismissed { .. } => "toast.dismissed",
            Self::ToastExpired { .. } => "toast.expired",
        }
    }
}
