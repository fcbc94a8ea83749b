//! Single-resolution readiness signal.

use std::{cell::RefCell, rc::Rc};

use futures::{
    channel::oneshot,
    future::{LocalBoxFuture, Shared},
    FutureExt,
};

/// Ready source reported when the platform was dropped before becoming ready.
pub const READY_SOURCE_CANCELLED: &str = "cancelled";

/// Shared future resolving to the ready source string.
pub type ReadyFuture = Shared<LocalBoxFuture<'static, String>>;

/// One-shot readiness signal observable by any number of waiters.
#[derive(Clone)]
pub struct ReadySignal {
    sender: Rc<RefCell<Option<oneshot::Sender<String>>>>,
    source: Rc<RefCell<Option<String>>>,
    future: ReadyFuture,
}

impl Default for ReadySignal {
    fn default() -> Self {
        let (sender, receiver) = oneshot::channel::<String>();
        let future = async move {
            receiver
                .await
                .unwrap_or_else(|_| READY_SOURCE_CANCELLED.to_string())
        }
        .boxed_local()
        .shared();
        Self {
            sender: Rc::new(RefCell::new(Some(sender))),
            source: Rc::new(RefCell::new(None)),
            future,
        }
    }
}

impl ReadySignal {
    /// Fulfils the signal with `source`. Only the first call has an effect.
    ///
    /// Returns whether this call fulfilled the signal.
    pub fn trigger(&self, source: impl Into<String>) -> bool {
        let Some(sender) = self.sender.borrow_mut().take() else {
            return false;
        };
        let source = source.into();
        *self.source.borrow_mut() = Some(source.clone());
        // Waiters may all be gone; the stored source still records readiness.
        let _ = sender.send(source);
        true
    }

    /// Returns whether the signal has been fulfilled.
    pub fn is_ready(&self) -> bool {
        self.source.borrow().is_some()
    }

    /// Ready source, once fulfilled.
    pub fn source(&self) -> Option<String> {
        self.source.borrow().clone()
    }

    /// Future resolving to the ready source.
    pub fn wait(&self) -> ReadyFuture {
        self.future.clone()
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn every_waiter_sees_the_first_source() {
        let ready = ReadySignal::default();
        let early = ready.wait();

        assert!(!ready.is_ready());
        assert!(ready.trigger("dom"));
        assert!(!ready.trigger("cordova"));

        assert_eq!(block_on(early), "dom");
        assert_eq!(block_on(ready.wait()), "dom");
        assert_eq!(ready.source().as_deref(), Some("dom"));
    }

    #[test]
    fn pending_signal_does_not_resolve() {
        let ready = ReadySignal::default();
        assert!(ready.wait().now_or_never().is_none());
        ready.trigger("shell");
        assert_eq!(ready.wait().now_or_never().as_deref(), Some("shell"));
    }

    #[test]
    fn dropping_the_signal_cancels_waiters() {
        let ready = ReadySignal::default();
        let waiter = ready.wait();
        drop(ready);
        assert_eq!(block_on(waiter), READY_SOURCE_CANCELLED);
    }
}
