//! `setTimeout`-backed [`TaskScheduler`].

use std::{cell::RefCell, collections::BTreeMap, rc::Rc, time::Duration};

use platform_profile::{ScheduledTask, TaskId, TaskScheduler};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast};

#[derive(Default)]
struct TimeoutState {
    next_id: u64,
    pending: BTreeMap<TaskId, PendingTimeout>,
}

struct PendingTimeout {
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    handle: i32,
    task: ScheduledTask,
}

/// Scheduler running tasks through `window.setTimeout`.
///
/// Tasks stay in an internal table until their timer fires, so cancelling only needs the
/// table entry and the browser timer handle. Outside a browser tasks are recorded but never
/// run.
#[derive(Clone, Default)]
pub struct TimeoutScheduler {
    state: Rc<RefCell<TimeoutState>>,
}

impl TimeoutScheduler {
    /// Creates an empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tasks whose timer has not fired yet.
    pub fn pending_count(&self) -> usize {
        self.state.borrow().pending.len()
    }

    fn start_timer(&self, id: TaskId, delay: Duration) -> i32 {
        #[cfg(target_arch = "wasm32")]
        {
            let weak = Rc::downgrade(&self.state);
            let callback = Closure::once_into_js(move || {
                let Some(state) = weak.upgrade() else {
                    return;
                };
                let task = state.borrow_mut().pending.remove(&id).map(|entry| entry.task);
                if let Some(task) = task {
                    task();
                }
            });
            let timeout = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
            match web_sys::window().map(|window| {
                window.set_timeout_with_callback_and_timeout_and_arguments_0(
                    callback.unchecked_ref(),
                    timeout,
                )
            }) {
                Some(Ok(handle)) => handle,
                Some(Err(err)) => {
                    tracing::warn!("setTimeout failed: {err:?}");
                    0
                }
                None => {
                    tracing::warn!("window unavailable; scheduled task will not run");
                    0
                }
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (id, delay);
            0
        }
    }
}

impl TaskScheduler for TimeoutScheduler {
    fn schedule(&self, delay: Duration, task: ScheduledTask) -> TaskId {
        let id = {
            let mut state = self.state.borrow_mut();
            state.next_id = state.next_id.saturating_add(1);
            TaskId(state.next_id)
        };
        let handle = self.start_timer(id, delay);
        self.state
            .borrow_mut()
            .pending
            .insert(id, PendingTimeout { handle, task });
        id
    }

    fn cancel(&self, id: TaskId) {
        let Some(entry) = self.state.borrow_mut().pending.remove(&id) else {
            return;
        };

        #[cfg(target_arch = "wasm32")]
        {
            if let Some(window) = web_sys::window() {
                window.clear_timeout_with_handle(entry.handle);
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            drop(entry);
        }
    }
}
