//! Deferred-task scheduling contract used by resize debouncing.
//!
//! Browser builds back this with `setTimeout`; tests drive [`ManualScheduler`], whose clock
//! only moves when [`ManualScheduler::advance`] is called.

use std::{cell::RefCell, collections::BTreeMap, rc::Rc, time::Duration};

/// Opaque identifier for a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(pub u64);

/// Deferred unit of work.
pub type ScheduledTask = Box<dyn FnOnce()>;

/// Host timer service.
pub trait TaskScheduler {
    /// Runs `task` once after `delay` and returns an id that can cancel it.
    fn schedule(&self, delay: Duration, task: ScheduledTask) -> TaskId;

    /// Cancels a pending task. Unknown or already-run ids are ignored.
    fn cancel(&self, id: TaskId);
}

#[derive(Default)]
struct ManualState {
    now: Duration,
    next_id: u64,
    tasks: BTreeMap<TaskId, (Duration, ScheduledTask)>,
}

/// Deterministic scheduler with a virtual clock.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    state: Rc<RefCell<ManualState>>,
}

impl ManualScheduler {
    /// Creates a scheduler at virtual time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.state.borrow().now
    }

    /// Number of tasks waiting to run.
    pub fn pending_count(&self) -> usize {
        self.state.borrow().tasks.len()
    }

    /// Moves the clock forward by `by`, running every task that falls due in deadline order.
    ///
    /// Tasks scheduled by a running task are eligible in the same call when their deadline
    /// falls inside the advanced window.
    pub fn advance(&self, by: Duration) {
        let target = self.state.borrow().now.saturating_add(by);
        loop {
            let due = {
                let mut state = self.state.borrow_mut();
                let next = state
                    .tasks
                    .iter()
                    .filter(|(_, (deadline, _))| *deadline <= target)
                    .min_by_key(|(id, (deadline, _))| (*deadline, **id))
                    .map(|(id, (deadline, _))| (*id, *deadline));
                match next {
                    Some((id, deadline)) => {
                        state.now = deadline;
                        state.tasks.remove(&id).map(|(_, task)| task)
                    }
                    None => {
                        state.now = target;
                        None
                    }
                }
            };
            match due {
                Some(task) => task(),
                None => break,
            }
        }
    }
}

impl TaskScheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: ScheduledTask) -> TaskId {
        let mut state = self.state.borrow_mut();
        state.next_id = state.next_id.saturating_add(1);
        let id = TaskId(state.next_id);
        let deadline = state.now.saturating_add(delay);
        state.tasks.insert(id, (deadline, task));
        id
    }

    fn cancel(&self, id: TaskId) {
        self.state.borrow_mut().tasks.remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use pretty_assertions::assert_eq;

    use super::*;

    fn push(log: &Rc<RefCell<Vec<&'static str>>>, label: &'static str) -> ScheduledTask {
        let log = Rc::clone(log);
        Box::new(move || log.borrow_mut().push(label))
    }

    #[test]
    fn tasks_run_in_deadline_order_once_due() {
        let scheduler = ManualScheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        scheduler.schedule(Duration::from_millis(300), push(&log, "late"));
        scheduler.schedule(Duration::from_millis(100), push(&log, "early"));

        scheduler.advance(Duration::from_millis(99));
        assert!(log.borrow().is_empty());

        scheduler.advance(Duration::from_millis(300));
        assert_eq!(*log.borrow(), ["early", "late"]);
        assert_eq!(scheduler.pending_count(), 0);
        assert_eq!(scheduler.now(), Duration::from_millis(399));
    }

    #[test]
    fn cancelled_task_never_runs() {
        let scheduler = ManualScheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let id = scheduler.schedule(Duration::from_millis(10), push(&log, "cancelled"));
        scheduler.cancel(id);
        scheduler.cancel(id);

        scheduler.advance(Duration::from_secs(1));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn task_may_schedule_follow_up_work() {
        let scheduler = ManualScheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let inner = scheduler.clone();
        let inner_log = Rc::clone(&log);
        scheduler.schedule(
            Duration::from_millis(10),
            Box::new(move || {
                inner_log.borrow_mut().push("first");
                inner.schedule(Duration::from_millis(10), push(&inner_log, "second"));
            }),
        );

        scheduler.advance(Duration::from_millis(15));
        assert_eq!(*log.borrow(), ["first"]);
        scheduler.advance(Duration::from_millis(5));
        assert_eq!(*log.borrow(), ["first", "second"]);
    }
}
