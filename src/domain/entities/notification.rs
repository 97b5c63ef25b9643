use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Kind of event a notification reports.
///
/// Unknown labels are kept verbatim in `Custom` rather than rejected, so
/// callers are free to introduce categories the store has never heard of.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum NotificationCategory {
    Feedback,
    Match,
    Interview,
    Reminder,
    System,
    Success,
    Error,
    Warning,
    Info,
    Custom(String),
}

impl fmt::Display for NotificationCategory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            NotificationCategory::Feedback => write!(f, "feedback"),
            NotificationCategory::Match => write!(f, "match"),
            NotificationCategory::Interview => write!(f, "interview"),
            NotificationCategory::Reminder => write!(f, "reminder"),
            NotificationCategory::System => write!(f, "system"),
            NotificationCategory::Success => write!(f, "success"),
            NotificationCategory::Error => write!(f, "error"),
            NotificationCategory::Warning => write!(f, "warning"),
            NotificationCategory::Info => write!(f, "info"),
            NotificationCategory::Custom(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for NotificationCategory {
    fn from(label: &str) -> Self {
        match label.to_ascii_lowercase().as_str() {
            "feedback" => NotificationCategory::Feedback,
            "match" => NotificationCategory::Match,
            "interview" => NotificationCategory::Interview,
            "reminder" => NotificationCategory::Reminder,
            "system" => NotificationCategory::System,
            "success" => NotificationCategory::Success,
            "error" => NotificationCategory::Error,
            "warning" => NotificationCategory::Warning,
            "info" => NotificationCategory::Info,
            _ => NotificationCategory::Custom(label.to_string()),
        }
    }
}

impl From<String> for NotificationCategory {
    fn from(label: String) -> Self {
        NotificationCategory::from(label.as_str())
    }
}

/// Caller-supplied fields for a new notification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewNotification {
    pub category: NotificationCategory,
    pub title: String,
    pub message: String,
    pub action_label: Option<String>,
    pub action_target: Option<String>,
    pub icon: Option<String>,
    #[serde(default)]
    pub metadata: BTreeMap<String, Value>,
}

impl NewNotification {
    pub fn new(
        category: impl Into<NotificationCategory>,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            title: title.into(),
            message: message.into(),
            action_label: None,
            action_target: None,
            icon: None,
            metadata: BTreeMap::new(),
        }
    }

    /// Attaches a call-to-action, e.g. "View job" pointing at a route.
    pub fn with_action(mut self, label: impl Into<String>, target: impl Into<String>) -> Self {
        self.action_label = Some(label.into());
        self.action_target = Some(target.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notification {
    pub id: Uuid,
    pub category: NotificationCategory,
    pub title: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub is_read: bool,
    pub action_label: Option<String>,
    pub action_target: Option<String>,
    pub icon: Option<String>,
    #[serde(default)]
    pub metadata: BTreeMap<String, Value>,
}

impl Notification {
    pub fn new(input: NewNotification) -> Self {
        Self {
            id: Uuid::new_v4(),
            category: input.category,
            title: input.title,
            message: input.message,
            created_at: Utc::now(),
            is_read: false,
            action_label: input.action_label,
            action_target: input.action_target,
            icon: input.icon,
            metadata: input.metadata,
        }
    }

    /// Returns `true` if the notification was unread before the call.
    pub fn mark_as_read(&mut self) -> bool {
        !std::mem::replace(&mut self.is_read, true)
    }
}
