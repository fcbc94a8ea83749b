//! Priority registry for hardware/shell back-button actions.

use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use crate::error::run_logged;

/// Handler run when it wins a back-button dispatch.
pub type BackButtonHandler = Rc<dyn Fn()>;

struct BackButtonAction {
    id: u64,
    priority: i32,
    handler: BackButtonHandler,
}

#[derive(Default)]
struct ActionState {
    next_id: u64,
    actions: Vec<BackButtonAction>,
}

/// Back-button action registry; only the highest-priority action runs per dispatch.
#[derive(Clone, Default)]
pub struct BackButtonActions {
    state: Rc<RefCell<ActionState>>,
}

impl BackButtonActions {
    /// Registers `handler` at `priority` and returns its registration handle.
    pub fn register(&self, handler: BackButtonHandler, priority: i32) -> BackButtonRegistration {
        let mut state = self.state.borrow_mut();
        state.next_id = state.next_id.saturating_add(1);
        let id = state.next_id;
        state.actions.push(BackButtonAction {
            id,
            priority,
            handler,
        });
        BackButtonRegistration {
            state: Rc::downgrade(&self.state),
            id,
        }
    }

    /// Runs the winning action: highest priority, and among equals the one registered last.
    ///
    /// Returns whether an action ran.
    pub fn run(&self) -> bool {
        let winner = {
            let state = self.state.borrow();
            let mut winner: Option<&BackButtonAction> = None;
            for action in &state.actions {
                if winner.map_or(true, |current| action.priority >= current.priority) {
                    winner = Some(action);
                }
            }
            winner.map(|action| Rc::clone(&action.handler))
        };

        match winner {
            Some(handler) => {
                run_logged("back-button", || handler());
                true
            }
            None => false,
        }
    }

    /// Number of registered actions.
    pub fn len(&self) -> usize {
        self.state.borrow().actions.len()
    }

    /// Returns whether no actions are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Handle returned by [`BackButtonActions::register`].
#[derive(Debug, Clone)]
pub struct BackButtonRegistration {
    state: Weak<RefCell<ActionState>>,
    id: u64,
}

impl BackButtonRegistration {
    /// Removes the action. Returns `false` when it was already removed.
    pub fn unregister(&self) -> bool {
        let Some(state) = self.state.upgrade() else {
            return false;
        };
        let mut state = state.borrow_mut();
        let Some(index) = state.actions.iter().position(|a| a.id == self.id) else {
            return false;
        };
        state.actions.remove(index);
        true
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use pretty_assertions::assert_eq;

    use super::*;

    fn labelled(log: &Rc<RefCell<Vec<i32>>>, label: i32) -> BackButtonHandler {
        let log = Rc::clone(log);
        Rc::new(move || log.borrow_mut().push(label))
    }

    #[test]
    fn only_highest_priority_runs() {
        let actions = BackButtonActions::default();
        let log = Rc::new(RefCell::new(Vec::new()));
        for priority in [1, 5, 3] {
            actions.register(labelled(&log, priority), priority);
        }

        assert!(actions.run());
        assert_eq!(*log.borrow(), [5]);
    }

    #[test]
    fn equal_priority_prefers_last_registered() {
        let actions = BackButtonActions::default();
        let log = Rc::new(RefCell::new(Vec::new()));
        actions.register(labelled(&log, 1), 10);
        actions.register(labelled(&log, 2), 10);

        actions.run();
        assert_eq!(*log.borrow(), [2]);
    }

    #[test]
    fn empty_registry_is_a_noop() {
        assert!(!BackButtonActions::default().run());
    }

    #[test]
    fn unregistered_action_no_longer_wins() {
        let actions = BackButtonActions::default();
        let log = Rc::new(RefCell::new(Vec::new()));
        actions.register(labelled(&log, 0), 0);
        let modal = actions.register(labelled(&log, 100), 100);

        assert!(modal.unregister());
        actions.run();

        assert_eq!(*log.borrow(), [0]);
        assert_eq!(actions.len(), 1);
    }

    #[test]
    fn handler_may_unregister_itself() {
        let actions = BackButtonActions::default();
        let slot: Rc<RefCell<Option<BackButtonRegistration>>> = Rc::new(RefCell::new(None));
        let inner = Rc::clone(&slot);
        let registration = actions.register(
            Rc::new(move || {
                if let Some(registration) = inner.borrow().as_ref() {
                    registration.unregister();
                }
            }),
            1,
        );
        *slot.borrow_mut() = Some(registration);

        assert!(actions.run());
        assert!(actions.is_empty());
    }

    #[test]
    fn panicking_action_is_contained() {
        let actions = BackButtonActions::default();
        actions.register(Rc::new(|| panic!("back handler failed")), 1);

        assert!(actions.run());
        assert!(actions.run());
        assert_eq!(actions.len(), 1);
    }
}
