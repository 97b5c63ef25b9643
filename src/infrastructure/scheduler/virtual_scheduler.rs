use crate::domain::services::scheduler::{ScheduledTask, Scheduler, TaskHandle};
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;
use tracing::trace;

/// Scheduler driven by an explicit virtual clock.
///
/// Nothing fires until [`VirtualScheduler::advance`] is called. Due tasks run
/// in deadline order, ties broken by scheduling order, and a task scheduled
/// by another task during the same `advance` fires too if it falls due.
#[derive(Default)]
pub struct VirtualScheduler {
    state: Mutex<ClockState>,
}

#[derive(Default)]
struct ClockState {
    now: Duration,
    sequence: u64,
    due: BTreeMap<(Duration, u64), (TaskHandle, ScheduledTask)>,
    index: HashMap<TaskHandle, (Duration, u64)>,
}

impl VirtualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed on the virtual clock since creation.
    pub fn now(&self) -> Duration {
        self.state.lock().now
    }

    /// Moves the clock forward, firing every task that falls due on the way.
    /// Returns how many tasks ran.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.state.lock().now + by;
        let mut fired = 0;

        loop {
            let task = {
                let mut state = self.state.lock();
                let is_due = matches!(
                    state.due.first_key_value(),
                    Some((&(deadline, _), _)) if deadline <= target
                );
                if !is_due {
                    state.now = target;
                    break;
                }
                let Some(((deadline, _), (handle, task))) = state.due.pop_first() else {
                    break;
                };
                state.index.remove(&handle);
                state.now = state.now.max(deadline);
                trace!(%handle, ?deadline, "Virtual task fired");
                task
            };

            task();
            fired += 1;
        }
        fired
    }

    /// Advances to the latest pending deadline, draining the schedule.
    pub fn run_until_idle(&self) -> usize {
        let mut fired = 0;
        loop {
            let remaining = {
                let state = self.state.lock();
                match state.due.last_key_value() {
                    Some((&(deadline, _), _)) => deadline.saturating_sub(state.now),
                    None => return fired,
                }
            };
            fired += self.advance(remaining);
        }
    }
}

impl Scheduler for VirtualScheduler {
    fn schedule(&self, delay: Duration, task: ScheduledTask) -> TaskHandle {
        let handle = TaskHandle::next();
        let mut state = self.state.lock();
        let key = (state.now.saturating_add(delay), state.sequence);
        state.sequence += 1;
        state.due.insert(key, (handle, task));
        state.index.insert(handle, key);
        handle
    }

    fn cancel(&self, handle: TaskHandle) {
        let mut state = self.state.lock();
        if let Some(key) = state.index.remove(&handle) {
            state.due.remove(&key);
            trace!(%handle, "Virtual task cancelled");
        }
    }

    fn pending(&self) -> usize {
        self.state.lock().index.len()
    }
}
