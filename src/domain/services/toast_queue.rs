use crate::domain::{
    entities::{Toast, ToastRequest},
    events::{publisher::publish_or_warn, BusEvent, DynEventPublisher},
    services::scheduler::{DynScheduler, TaskHandle},
};
use chrono::Utc;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, trace};
use uuid::Uuid;

/// Immutable view of the active toasts, in arrival order.
pub type ToastList = Arc<Vec<Toast>>;

/// Owns the ephemeral toasts and their removal timers.
///
/// A toast is in the list exactly as long as its handle is in `timers`; both
/// change together under the `timers` lock. Expiry and dismissal each start
/// by taking the handle out of `timers`, so only one of them can remove a
/// given toast. Lock order is `timers`, then the scheduler, then the list.
///
/// `ToastShown` is published while `timers` is held, so publishers must not
/// call back into the queue.
pub struct ToastQueue {
    inner: Arc<ToastQueueInner>,
}

struct ToastQueueInner {
    toasts: watch::Sender<ToastList>,
    timers: Mutex<HashMap<Uuid, TaskHandle>>,
    scheduler: DynScheduler,
    publisher: DynEventPublisher,
    default_duration: Duration,
}

impl ToastQueue {
    pub fn new(
        scheduler: DynScheduler,
        publisher: DynEventPublisher,
        default_duration: Duration,
    ) -> Self {
        let (toasts, _) = watch::channel(Arc::new(Vec::new()));
        Self {
            inner: Arc::new(ToastQueueInner {
                toasts,
                timers: Mutex::new(HashMap::new()),
                scheduler,
                publisher,
                default_duration,
            }),
        }
    }

    /// Appends a toast and schedules its removal. The removal never happens
    /// inside this call, even with a zero duration.
    pub fn show(&self, request: ToastRequest) -> Uuid {
        let toast = Toast::new(request, self.inner.default_duration);
        let (id, kind, duration) = (toast.id, toast.kind, toast.duration);

        {
            let mut timers = self.inner.timers.lock();
            self.inner
                .toasts
                .send_modify(|list| Arc::make_mut(list).push(toast));

            let queue: Weak<ToastQueueInner> = Arc::downgrade(&self.inner);
            let handle = self.inner.scheduler.schedule(
                duration,
                Box::new(move || {
                    if let Some(inner) = queue.upgrade() {
                        inner.expire(id);
                    }
                }),
            );
            timers.insert(id, handle);

            // Announced before the lock is released: removal of this toast
            // needs the same lock, so its event can only follow this one.
            debug!(toast_id = %id, %kind, ?duration, "Toast shown");
            publish_or_warn(
                self.inner.publisher.as_ref(),
                BusEvent::ToastShown {
                    toast_id: id,
                    kind,
                    duration_ms: u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
                    shown_at: Utc::now(),
                },
            );
        }
        id
    }

    /// Cancels the toast's timer and removes it. Unknown or already removed
    /// ids are ignored, which makes this safe to race against expiry.
    pub fn dismiss(&self, id: Uuid) -> bool {
        let removed = {
            let mut timers = self.inner.timers.lock();
            match timers.remove(&id) {
                Some(handle) => {
                    self.inner.scheduler.cancel(handle);
                    self.inner.remove(id)
                }
                None => false,
            }
        };

        if removed {
            debug!(toast_id = %id, "Toast dismissed");
            publish_or_warn(self.inner.publisher.as_ref(), BusEvent::toast_dismissed(id));
        } else {
            trace!(toast_id = %id, "Dismiss ignored for inactive toast");
        }
        removed
    }

    /// Dismisses every active toast. Returns how many were removed.
    pub fn dismiss_all(&self) -> usize {
        let dismissed: Vec<Uuid> = {
            let mut timers = self.inner.timers.lock();
            let ids: Vec<Uuid> = timers
                .drain()
                .map(|(id, handle)| {
                    self.inner.scheduler.cancel(handle);
                    id
                })
                .collect();
            self.inner.toasts.send_if_modified(|list| {
                if list.is_empty() {
                    return false;
                }
                *list = Arc::new(Vec::new());
                true
            });
            ids
        };

        for id in &dismissed {
            publish_or_warn(self.inner.publisher.as_ref(), BusEvent::toast_dismissed(*id));
        }
        if !dismissed.is_empty() {
            debug!(count = dismissed.len(), "All toasts dismissed");
        }
        dismissed.len()
    }

    /// Runs the toast's action callback, if it is still active and has one.
    /// The timer keeps running.
    pub fn trigger_action(&self, id: Uuid) -> bool {
        let action = self
            .inner
            .toasts
            .borrow()
            .iter()
            .find(|t| t.id == id)
            .and_then(|t| t.action.clone());

        match action {
            Some(action) => {
                debug!(toast_id = %id, label = %action.label, "Toast action triggered");
                action.invoke();
                true
            }
            None => false,
        }
    }

    pub fn toasts(&self) -> ToastList {
        self.inner.toasts.borrow().clone()
    }

    pub fn toast(&self, id: Uuid) -> Option<Toast> {
        self.inner.toasts.borrow().iter().find(|t| t.id == id).cloned()
    }

    pub fn active_count(&self) -> usize {
        self.inner.toasts.borrow().len()
    }

    pub fn default_duration(&self) -> Duration {
        self.inner.default_duration
    }

    pub fn subscribe(&self) -> watch::Receiver<ToastList> {
        self.inner.toasts.subscribe()
    }
}

impl ToastQueueInner {
    /// Timer path. Loses quietly if a dismissal already claimed the handle.
    fn expire(&self, id: Uuid) {
        let removed = {
            let mut timers = self.timers.lock();
            timers.remove(&id).is_some() && self.remove(id)
        };

        if removed {
            debug!(toast_id = %id, "Toast expired");
            publish_or_warn(self.publisher.as_ref(), BusEvent::toast_expired(id));
        } else {
            trace!(toast_id = %id, "Expiry ignored for inactive toast");
        }
    }

    /// Filters the id out of the current list. Idempotent.
    fn remove(&self, id: Uuid) -> bool {
        self.toasts.send_if_modified(|list| {
            match list.iter().position(|t| t.id == id) {
                Some(index) => {
                    Arc::make_mut(list).remove(index);
                    true
                }
                None => false,
            }
        })
    }
}

impl Drop for ToastQueueInner {
    fn drop(&mut self) {
        for (_, handle) in self.timers.get_mut().drain() {
            self.scheduler.cancel(handle);
        }
    }
}
