use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Deferred unit of work handed to a [`Scheduler`].
pub type ScheduledTask = Box<dyn FnOnce() + Send + 'static>;

/// Identifies one scheduled call. Handles are never reused within a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(u64);

impl TaskHandle {
    pub fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for TaskHandle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "task-{}", self.0)
    }
}

/// Deferred, cancelable callback execution.
///
/// Implementations must uphold three rules:
///
/// - `schedule` never runs the task before returning, even for a zero delay.
/// - Firing and cancelling race on the same live set: whichever claims the
///   handle first wins, and a cancelled task is never invoked.
/// - Tasks run outside any lock held by the scheduler, so a task may call
///   back into `schedule` or `cancel`.
///
/// `cancel` on a handle that already fired, was already cancelled, or was
/// never issued is a no-op.
pub trait Scheduler: Send + Sync {
    fn schedule(&self, delay: Duration, task: ScheduledTask) -> TaskHandle;
    fn cancel(&self, handle: TaskHandle);

    /// Number of tasks scheduled but neither fired nor cancelled.
    fn pending(&self) -> usize;
}

pub type DynScheduler = Arc<dyn Scheduler>;
