//! Browser (`wasm32`) host adapters for [`platform_profile`].
//!
//! This crate reads live detection signals from the page, backs the facade's host contracts
//! with `window`, `document`, and `setTimeout`, and wires browser events into the facade.
//! Non-wasm builds compile every adapter to an inert fallback so native tests can exercise
//! the same public API.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod bridge;
#[cfg(feature = "leptos")]
pub mod context;
pub mod document;
pub mod events;
pub mod scheduler;
pub mod setup;
pub mod signals;
pub mod viewport;

pub use bridge::{json_to_js, native_method_from_js, register_js_method};
#[cfg(feature = "leptos")]
pub use context::{provide_platform, try_use_platform, use_platform};
pub use document::{document_is_ready, probe_css_props, WebDocumentAttributes};
pub use events::{listen_shell_events, listen_window_resize, on_dom_ready};
pub use scheduler::TimeoutScheduler;
pub use setup::{install_diagnostics, setup_platform, setup_platform_with_overrides, web_host};
pub use signals::{current_url, live_signals};
pub use viewport::WindowViewport;
