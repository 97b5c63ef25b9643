//! The shared notification bus.
//!
//! [`NotificationBus`] composes the [`NotificationStore`] and the
//! [`ToastQueue`] behind one cheaply clonable handle. It is built once at the
//! composition root and handed to every consumer, either directly or through
//! [`crate::application::context`].

use crate::domain::{
    entities::{NewNotification, Notification, NotificationCategory, ToastRequest},
    error::DomainResult,
    events::{publisher::publish_or_warn, BusEvent, DynEventPublisher, EventPublisher},
    services::{
        notification_store::{NotificationList, NotificationStore},
        scheduler::DynScheduler,
        toast_queue::{ToastList, ToastQueue},
    },
};
use crate::infrastructure::{
    config::BusConfig, events::BroadcastEventPublisher, scheduler::TokioScheduler,
};
use std::sync::Arc;
use tokio::sync::{broadcast, watch};
use tracing::info;
use uuid::Uuid;

#[derive(Clone)]
pub struct NotificationBus {
    inner: Arc<BusInner>,
}

struct BusInner {
    notifications: NotificationStore,
    toasts: ToastQueue,
    events: Arc<BusPublisher>,
}

/// Feeds every event to the bus's own broadcast channel and, when one was
/// configured, to an extra publisher.
struct BusPublisher {
    broadcast: BroadcastEventPublisher,
    observer: Option<DynEventPublisher>,
}

impl EventPublisher for BusPublisher {
    fn publish_event(&self, event: BusEvent) -> DomainResult<()> {
        if let Some(observer) = &self.observer {
            publish_or_warn(observer.as_ref(), event.clone());
        }
        self.broadcast.publish_event(event)
    }
}

#[derive(Default)]
pub struct NotificationBusBuilder {
    config: BusConfig,
    seed: Vec<Notification>,
    scheduler: Option<DynScheduler>,
    publisher: Option<DynEventPublisher>,
}

impl NotificationBusBuilder {
    pub fn config(mut self, config: BusConfig) -> Self {
        self.config = config;
        self
    }

    /// Initial notifications, most recent first.
    pub fn seed(mut self, seed: Vec<Notification>) -> Self {
        self.seed = seed;
        self
    }

    /// Seed given as a JSON array of notifications.
    pub fn seed_json(self, json: &str) -> DomainResult<Self> {
        let seed: Vec<Notification> = serde_json::from_str(json)?;
        Ok(self.seed(seed))
    }

    pub fn scheduler(mut self, scheduler: DynScheduler) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    pub fn publisher(mut self, publisher: DynEventPublisher) -> Self {
        self.publisher = Some(publisher);
        self
    }

    /// Without an explicit scheduler the bus uses tokio timers, which needs
    /// a runtime in the calling context.
    pub fn build(self) -> DomainResult<NotificationBus> {
        let scheduler = match self.scheduler {
            Some(scheduler) => scheduler,
            None => Arc::new(TokioScheduler::current()?) as DynScheduler,
        };

        let events = Arc::new(BusPublisher {
            broadcast: BroadcastEventPublisher::new(self.config.event_channel_capacity),
            observer: self.publisher,
        });

        let seeded = self.seed.len();
        let notifications = NotificationStore::with_seed(self.seed, events.clone());
        let toasts = ToastQueue::new(
            scheduler,
            events.clone(),
            self.config.default_toast_duration,
        );

        info!(
            seeded,
            default_toast_ms =
                u64::try_from(self.config.default_toast_duration.as_millis()).unwrap_or(u64::MAX),
            "Notification bus ready"
        );

        Ok(NotificationBus {
            inner: Arc::new(BusInner {
                notifications,
                toasts,
                events,
            }),
        })
    }
}

impl NotificationBus {
    pub fn builder() -> NotificationBusBuilder {
        NotificationBusBuilder::default()
    }

    // Notifications

    pub fn add_notification(&self, input: NewNotification) -> Notification {
        self.inner.notifications.add(input)
    }

    pub fn mark_as_read(&self, id: Uuid) -> bool {
        self.inner.notifications.mark_as_read(id)
    }

    pub fn mark_all_as_read(&self) -> usize {
        self.inner.notifications.mark_all_as_read()
    }

    pub fn delete_notification(&self, id: Uuid) -> bool {
        self.inner.notifications.delete(id)
    }

    pub fn clear_notifications(&self) -> usize {
        self.inner.notifications.clear()
    }

    pub fn notifications(&self) -> NotificationList {
        self.inner.notifications.notifications()
    }

    pub fn unread_count(&self) -> usize {
        self.inner.notifications.unread_count()
    }

    pub fn notification(&self, id: Uuid) -> Option<Notification> {
        self.inner.notifications.notification(id)
    }

    pub fn unread_notifications(&self) -> Vec<Notification> {
        self.inner.notifications.unread_notifications()
    }

    pub fn notifications_by_category(&self, category: &NotificationCategory) -> Vec<Notification> {
        self.inner.notifications.notifications_by_category(category)
    }

    pub fn recent_notifications(&self, limit: usize) -> Vec<Notification> {
        self.inner.notifications.recent_notifications(limit)
    }

    pub fn watch_notifications(&self) -> watch::Receiver<NotificationList> {
        self.inner.notifications.subscribe()
    }

    // Toasts

    pub fn show_toast(&self, request: ToastRequest) -> Uuid {
        self.inner.toasts.show(request)
    }

    pub fn dismiss_toast(&self, id: Uuid) -> bool {
        self.inner.toasts.dismiss(id)
    }

    pub fn dismiss_all_toasts(&self) -> usize {
        self.inner.toasts.dismiss_all()
    }

    pub fn trigger_toast_action(&self, id: Uuid) -> bool {
        self.inner.toasts.trigger_action(id)
    }

    pub fn toasts(&self) -> ToastList {
        self.inner.toasts.toasts()
    }

    pub fn watch_toasts(&self) -> watch::Receiver<ToastList> {
        self.inner.toasts.subscribe()
    }

    // Events

    pub fn subscribe_events(&self) -> broadcast::Receiver<BusEvent> {
        self.inner.events.broadcast.subscribe()
    }

    /// Whether two handles point at the same bus.
    pub fn same_bus(&self, other: &NotificationBus) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}
