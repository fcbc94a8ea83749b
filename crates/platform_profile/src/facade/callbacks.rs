//! Ordered callback lists with registration handles and panic-contained dispatch.

use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use crate::error::run_logged;

/// Callback stored in a [`CallbackList`].
pub type PlatformCallback = Rc<dyn Fn()>;

#[derive(Default)]
struct CallbackState {
    next_id: u64,
    entries: Vec<(u64, PlatformCallback)>,
}

/// Registration-ordered callback list.
///
/// Dispatch iterates a snapshot, so callbacks may register or unregister entries while the
/// list is running; such changes apply to the next dispatch.
#[derive(Clone, Default)]
pub struct CallbackList {
    state: Rc<RefCell<CallbackState>>,
}

impl CallbackList {
    /// Appends `callback` and returns its registration handle.
    pub fn register(&self, callback: PlatformCallback) -> CallbackRegistration {
        let mut state = self.state.borrow_mut();
        state.next_id = state.next_id.saturating_add(1);
        let id = state.next_id;
        state.entries.push((id, callback));
        CallbackRegistration {
            state: Rc::downgrade(&self.state),
            id,
        }
    }

    /// Number of registered callbacks.
    pub fn len(&self) -> usize {
        self.state.borrow().entries.len()
    }

    /// Returns whether no callbacks are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Runs every callback in registration order; a panicking callback is logged and the
    /// remaining callbacks still run.
    pub fn dispatch(&self, context: &'static str) {
        let snapshot: Vec<PlatformCallback> = self
            .state
            .borrow()
            .entries
            .iter()
            .map(|(_, callback)| Rc::clone(callback))
            .collect();
        for callback in snapshot {
            run_logged(context, || callback());
        }
    }
}

/// Handle returned by [`CallbackList::register`].
///
/// Dropping the handle keeps the callback registered; call [`CallbackRegistration::unregister`]
/// to remove it.
#[derive(Debug, Clone)]
pub struct CallbackRegistration {
    state: Weak<RefCell<CallbackState>>,
    id: u64,
}

impl CallbackRegistration {
    /// Removes the callback. Returns `false` when it was already removed.
    pub fn unregister(&self) -> bool {
        let Some(state) = self.state.upgrade() else {
            return false;
        };
        let mut state = state.borrow_mut();
        let Some(index) = state.entries.iter().position(|(id, _)| *id == self.id) else {
            return false;
        };
        state.entries.remove(index);
        true
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use pretty_assertions::assert_eq;

    use super::*;

    fn recorder(log: &Rc<RefCell<Vec<&'static str>>>, label: &'static str) -> PlatformCallback {
        let log = Rc::clone(log);
        Rc::new(move || log.borrow_mut().push(label))
    }

    #[test]
    fn dispatch_runs_in_registration_order_past_panics() {
        let list = CallbackList::default();
        let log = Rc::new(RefCell::new(Vec::new()));
        list.register(recorder(&log, "first"));
        list.register(Rc::new(|| panic!("resize handler failed")));
        list.register(recorder(&log, "third"));

        list.dispatch("resize");

        assert_eq!(*log.borrow(), ["first", "third"]);
    }

    #[test]
    fn unregister_removes_only_that_entry() {
        let list = CallbackList::default();
        let log = Rc::new(RefCell::new(Vec::new()));
        let first = list.register(recorder(&log, "first"));
        list.register(recorder(&log, "second"));

        assert!(first.unregister());
        assert!(!first.unregister());
        list.dispatch("resize");

        assert_eq!(*log.borrow(), ["second"]);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn callbacks_registered_during_dispatch_run_next_time() {
        let list = CallbackList::default();
        let log = Rc::new(RefCell::new(Vec::new()));
        let inner_list = list.clone();
        let inner_log = Rc::clone(&log);
        list.register(Rc::new(move || {
            inner_log.borrow_mut().push("outer");
            inner_list.register(recorder(&inner_log, "late"));
        }));

        list.dispatch("resize");
        assert_eq!(*log.borrow(), ["outer"]);

        log.borrow_mut().clear();
        list.dispatch("resize");
        assert_eq!(*log.borrow(), ["outer", "late"]);
    }
}
