//! Navigation observer that keeps an in-app history stack from router transitions and turns
//! page-level transitions into enter/leave events.
//!
//! The observer never navigates by itself except through [`NavController::to_root`], which
//! asks the router to step back once per recorded entry.

use std::{cell::RefCell, fmt, rc::Rc};

/// Route information the observer needs from a router.
pub trait RouteRecord: Clone {
    /// Route name used to detect a return to the previous entry.
    fn name(&self) -> Option<&str>;

    /// Number of matched route segments; `1` means a top-level page.
    fn matched_len(&self) -> usize;
}

/// Router capability used by [`NavController::to_root`].
pub trait RouterHistory {
    /// Steps back one history entry.
    fn back(&self);
}

/// Plain route value for routers that do not carry their own route type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteSnapshot {
    /// Route name.
    pub name: Option<String>,
    /// Full path.
    pub path: String,
    /// Matched segment count.
    pub matched_len: usize,
}

impl RouteSnapshot {
    /// Named top-level page route.
    pub fn page(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            path: path.into(),
            matched_len: 1,
        }
    }

    /// Named nested route with `matched_len` segments.
    pub fn nested(name: impl Into<String>, path: impl Into<String>, matched_len: usize) -> Self {
        Self {
            name: Some(name.into()),
            path: path.into(),
            matched_len,
        }
    }
}

impl RouteRecord for RouteSnapshot {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn matched_len(&self) -> usize {
        self.matched_len
    }
}

/// Direction of the most recent transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavDirection {
    /// A new entry was pushed.
    Forward,
    /// The previous entry was returned to.
    Backward,
    /// The last transition was nested inside a page.
    None,
}

impl NavDirection {
    /// Stable token (`forward`, `backward`, or empty).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Backward => "backward",
            Self::None => "",
        }
    }
}

/// Kind of page-level navigation event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEventKind {
    /// Forward page transition.
    Enter,
    /// Backward page transition.
    Leave,
}

/// Page-level transition handed to a [`NavEventSink`].
///
/// The receiver must call `next` to let the router complete the transition.
pub struct NavEvent<R> {
    /// Event kind.
    pub kind: NavEventKind,
    /// Destination route.
    pub to: R,
    /// Origin route.
    pub from: R,
    /// Router continuation.
    pub next: Box<dyn FnOnce()>,
}

impl<R: fmt::Debug> fmt::Debug for NavEvent<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavEvent")
            .field("kind", &self.kind)
            .field("to", &self.to)
            .field("from", &self.from)
            .finish_non_exhaustive()
    }
}

/// Receiver of page-level navigation events.
pub trait NavEventSink<R> {
    /// Delivers one event.
    fn emit(&self, event: NavEvent<R>);
}

struct NavState<R> {
    history: Vec<R>,
    direction: NavDirection,
    app_mounted: bool,
}

/// In-app history tracker driven by a router's before-each hook.
pub struct NavController<R: RouteRecord> {
    state: RefCell<NavState<R>>,
    sink: Option<Rc<dyn NavEventSink<R>>>,
}

impl<R: RouteRecord> Default for NavController<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RouteRecord> NavController<R> {
    /// Creates an observer without an event sink.
    pub fn new() -> Self {
        Self {
            state: RefCell::new(NavState {
                history: Vec::new(),
                direction: NavDirection::Forward,
                app_mounted: false,
            }),
            sink: None,
        }
    }

    /// Attaches the sink that receives page-level events.
    pub fn with_sink(mut self, sink: Rc<dyn NavEventSink<R>>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Router before-each hook.
    pub fn before_each(&self, to: R, from: R, next: impl FnOnce() + 'static) {
        let forward = {
            let state = self.state.borrow();
            let len = state.history.len();
            len <= 1 || state.history[len - 2].name() != to.name()
        };
        if forward {
            self.state.borrow_mut().history.push(to.clone());
        } else {
            self.state.borrow_mut().history.pop();
        }

        let page_level = from.matched_len() == 1 || to.matched_len() == 1;
        if !page_level {
            self.state.borrow_mut().direction = NavDirection::None;
            next();
            return;
        }

        let (direction, kind) = if forward {
            (NavDirection::Forward, NavEventKind::Enter)
        } else {
            (NavDirection::Backward, NavEventKind::Leave)
        };
        self.state.borrow_mut().direction = direction;
        self.emit(NavEvent {
            kind,
            to,
            from,
            next: Box::new(next),
        });
    }

    fn emit(&self, event: NavEvent<R>) {
        let first = {
            let mut state = self.state.borrow_mut();
            !std::mem::replace(&mut state.app_mounted, true)
        };
        // Nothing is mounted to receive the first page event yet.
        if first {
            (event.next)();
            return;
        }
        match &self.sink {
            Some(sink) => sink.emit(event),
            None => (event.next)(),
        }
    }

    /// Direction of the most recent transition.
    pub fn direction(&self) -> NavDirection {
        self.state.borrow().direction
    }

    /// Returns whether there is an entry to go back to.
    pub fn can_go_back(&self) -> bool {
        self.state.borrow().history.len() > 1
    }

    /// Oldest recorded entry.
    pub fn first(&self) -> Option<R> {
        self.state.borrow().history.first().cloned()
    }

    /// Current entry.
    pub fn active(&self) -> Option<R> {
        self.state.borrow().history.last().cloned()
    }

    /// Entry below the current one.
    pub fn previous(&self) -> Option<R> {
        let state = self.state.borrow();
        let len = state.history.len();
        len.checked_sub(2).and_then(|i| state.history.get(i).cloned())
    }

    /// Recorded entries, oldest first.
    pub fn history(&self) -> Vec<R> {
        self.state.borrow().history.clone()
    }

    /// Number of recorded entries.
    pub fn len(&self) -> usize {
        self.state.borrow().history.len()
    }

    /// Returns whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Steps the router back once per recorded entry.
    pub fn to_root(&self, router: &dyn RouterHistory) {
        for _ in 0..self.len() {
            router.back();
        }
    }
}

impl<R: RouteRecord + PartialEq> NavController<R> {
    /// Position of `route` in the history.
    pub fn index_of(&self, route: &R) -> Option<usize> {
        self.state.borrow().history.iter().position(|r| r == route)
    }
}
