use crate::domain::{
    error::{DomainError, DomainResult},
    services::scheduler::{ScheduledTask, Scheduler, TaskHandle},
};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::AbortHandle;
use tracing::{debug, trace};

/// Wall-clock scheduler backed by tokio timers. Each scheduled call is a
/// spawned task that sleeps, claims its handle from the live set, and runs
/// the callback only if the claim succeeded.
pub struct TokioScheduler {
    runtime: Handle,
    live: Arc<Mutex<HashMap<TaskHandle, AbortHandle>>>,
}

impl TokioScheduler {
    pub fn new(runtime: Handle) -> Self {
        Self {
            runtime,
            live: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Binds to the runtime of the calling context.
    pub fn current() -> DomainResult<Self> {
        let runtime = Handle::try_current().map_err(|e| {
            DomainError::InternalError(format!("No tokio runtime available: {}", e))
        })?;
        Ok(Self::new(runtime))
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: ScheduledTask) -> TaskHandle {
        let handle = TaskHandle::next();
        let live = self.live.clone();

        // Held until the abort handle is recorded, so the timer cannot claim
        // a handle that is not in the live set yet.
        let mut guard = self.live.lock();
        let join = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            let claimed = live.lock().remove(&handle).is_some();
            if claimed {
                trace!(%handle, "Timer fired");
                task();
            }
        });
        guard.insert(handle, join.abort_handle());
        handle
    }

    fn cancel(&self, handle: TaskHandle) {
        if let Some(abort) = self.live.lock().remove(&handle) {
            abort.abort();
            trace!(%handle, "Timer cancelled");
        }
    }

    fn pending(&self) -> usize {
        self.live.lock().len()
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        let live = std::mem::take(&mut *self.live.lock());
        if !live.is_empty() {
            debug!(count = live.len(), "Aborting pending timers");
        }
        for (_, abort) in live {
            abort.abort();
        }
    }
}
