use crate::domain::{
    entities::{NewNotification, Notification, NotificationCategory},
    events::{publisher::publish_or_warn, BusEvent, DynEventPublisher},
};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, trace};
use uuid::Uuid;

/// Immutable view of the notification list, most recent first.
pub type NotificationList = Arc<Vec<Notification>>;

/// Owns the durable notifications.
///
/// The list sits in a `watch` channel. Every mutation runs as one closure
/// over the value currently in the channel and swaps in the next list, so
/// two mutations in a row both land and a reader never sees half of one.
/// Snapshots handed out earlier are left untouched (`Arc::make_mut` copies
/// when a snapshot is still alive).
pub struct NotificationStore {
    state: watch::Sender<NotificationList>,
    publisher: DynEventPublisher,
}

impl NotificationStore {
    pub fn new(publisher: DynEventPublisher) -> Self {
        Self::with_seed(Vec::new(), publisher)
    }

    /// Starts from a host-provided list, kept in the given order.
    pub fn with_seed(seed: Vec<Notification>, publisher: DynEventPublisher) -> Self {
        let (state, _) = watch::channel(Arc::new(seed));
        Self { state, publisher }
    }

    pub fn add(&self, input: NewNotification) -> Notification {
        let notification = Notification::new(input);
        let created = notification.clone();

        self.state
            .send_modify(|list| Arc::make_mut(list).insert(0, notification));

        debug!(
            notification_id = %created.id,
            category = %created.category,
            "Notification added"
        );
        publish_or_warn(
            self.publisher.as_ref(),
            BusEvent::NotificationAdded {
                notification_id: created.id,
                category: created.category.clone(),
                title: created.title.clone(),
                created_at: created.created_at,
            },
        );
        created
    }

    /// Returns `false` when the id is unknown or the entry was already read.
    pub fn mark_as_read(&self, id: Uuid) -> bool {
        let changed = self.state.send_if_modified(|list| {
            match list.iter().position(|n| n.id == id && !n.is_read) {
                Some(index) => Arc::make_mut(list)[index].mark_as_read(),
                None => false,
            }
        });

        if changed {
            debug!(notification_id = %id, "Notification marked as read");
            publish_or_warn(self.publisher.as_ref(), BusEvent::notification_read(id));
        } else {
            trace!(notification_id = %id, "Mark as read had no effect");
        }
        changed
    }

    /// Marks every entry read in a single replace. Returns how many flipped.
    pub fn mark_all_as_read(&self) -> usize {
        let mut flipped = 0;
        self.state.send_if_modified(|list| {
            if list.iter().all(|n| n.is_read) {
                return false;
            }
            for notification in Arc::make_mut(list).iter_mut() {
                if notification.mark_as_read() {
                    flipped += 1;
                }
            }
            true
        });

        if flipped > 0 {
            debug!(count = flipped, "All notifications marked as read");
            publish_or_warn(
                self.publisher.as_ref(),
                BusEvent::all_notifications_read(flipped),
            );
        }
        flipped
    }

    /// Returns `false` when the id is unknown (never added or already deleted).
    pub fn delete(&self, id: Uuid) -> bool {
        let deleted = self.state.send_if_modified(|list| {
            match list.iter().position(|n| n.id == id) {
                Some(index) => {
                    Arc::make_mut(list).remove(index);
                    true
                }
                None => false,
            }
        });

        if deleted {
            debug!(notification_id = %id, "Notification deleted");
            publish_or_warn(self.publisher.as_ref(), BusEvent::notification_deleted(id));
        } else {
            trace!(notification_id = %id, "Delete ignored for unknown notification");
        }
        deleted
    }

    pub fn clear(&self) -> usize {
        let mut removed = 0;
        self.state.send_if_modified(|list| {
            removed = list.len();
            if removed == 0 {
                return false;
            }
            *list = Arc::new(Vec::new());
            true
        });

        if removed > 0 {
            debug!(count = removed, "Notifications cleared");
            publish_or_warn(
                self.publisher.as_ref(),
                BusEvent::notifications_cleared(removed),
            );
        }
        removed
    }

    pub fn notifications(&self) -> NotificationList {
        self.state.borrow().clone()
    }

    /// Counted from the current list on every call.
    pub fn unread_count(&self) -> usize {
        self.state.borrow().iter().filter(|n| !n.is_read).count()
    }

    pub fn notification(&self, id: Uuid) -> Option<Notification> {
        self.state.borrow().iter().find(|n| n.id == id).cloned()
    }

    pub fn unread_notifications(&self) -> Vec<Notification> {
        self.filtered(|n| !n.is_read)
    }

    pub fn notifications_by_category(&self, category: &NotificationCategory) -> Vec<Notification> {
        self.filtered(|n| &n.category == category)
    }

    pub fn recent_notifications(&self, limit: usize) -> Vec<Notification> {
        self.state.borrow().iter().take(limit).cloned().collect()
    }

    pub fn subscribe(&self) -> watch::Receiver<NotificationList> {
        self.state.subscribe()
    }

    fn filtered(&self, predicate: impl Fn(&Notification) -> bool) -> Vec<Notification> {
        self.state
            .borrow()
            .iter()
            .filter(|n| predicate(n))
            .cloned()
            .collect()
    }
}
