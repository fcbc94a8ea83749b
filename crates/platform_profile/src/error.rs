//! Error taxonomy for fallible platform APIs and panic-safe callback dispatch.

use std::panic::{catch_unwind, AssertUnwindSafe};

use thiserror::Error;

/// Typed error returned by the few platform APIs that let callers inspect a failure.
///
/// Resolution and dispatch never surface these to the host application on their own; the
/// facade logs them as warnings and continues with degraded behavior.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlatformError {
    /// A named method was invoked before any profile registered it.
    #[error("method `{name}` has not been registered")]
    MethodNotRegistered {
        /// Method name that was looked up.
        name: String,
    },
    /// Platform options could not be decoded.
    #[error("invalid platform options: {0}")]
    InvalidOptions(String),
    /// A user callback panicked and was contained at the dispatch boundary.
    #[error("{context} callback panicked: {message}")]
    CallbackPanicked {
        /// Dispatch site label (`resize`, `back-button`, `initialize`, ...).
        context: &'static str,
        /// Panic payload rendered as text.
        message: String,
    },
}

/// Runs `callback`, converting a panic into [`PlatformError::CallbackPanicked`].
///
/// Only unwinding panics can be contained. Under `panic = "abort"`, the default on
/// `wasm32-unknown-unknown`, a panicking callback still terminates the instance.
///
/// # Errors
///
/// Returns an error when the callback panics.
pub fn run_contained<F: FnOnce()>(context: &'static str, callback: F) -> Result<(), PlatformError> {
    catch_unwind(AssertUnwindSafe(callback)).map_err(|payload| {
        let message = if let Some(text) = payload.downcast_ref::<&str>() {
            (*text).to_string()
        } else if let Some(text) = payload.downcast_ref::<String>() {
            text.clone()
        } else {
            "non-string panic payload".to_string()
        };
        PlatformError::CallbackPanicked { context, message }
    })
}

/// Runs `callback` and logs a contained panic instead of returning it.
pub(crate) fn run_logged<F: FnOnce()>(context: &'static str, callback: F) {
    if let Err(err) = run_contained(context, callback) {
        tracing::error!("{err}");
    }
}
