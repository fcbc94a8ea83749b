//! Runtime platform profile detection and resolution.
//!
//! Callers describe the environments they care about (mobile OS, in-app browser shell,
//! desktop, embedded mini-program host) as [`ProfileDescriptor`]s in a [`ProfileRegistry`].
//! At startup the [`Platform`] facade matches them against live [`PlatformSignals`], builds
//! the most-general-first chain of active profiles, runs each profile's hooks, and then
//! answers environment queries for the rest of the process lifetime.
//!
//! This crate is host-agnostic. Browser adapters for [`PlatformHost`] live in
//! `platform_profile_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod css;
pub mod error;
pub mod facade;
pub mod host;
pub mod nav;
pub mod options;
pub mod query;
pub mod registry;
pub mod resolve;
pub mod schedule;
pub mod signals;
pub mod version;

pub use css::CssProps;
pub use error::{run_contained, PlatformError};
pub use facade::{
    BackButtonActions, BackButtonHandler, BackButtonRegistration, CallbackList,
    CallbackRegistration, MethodRegistry, NativeMethod, Platform, PlatformCallback, ReadyFuture,
    ReadySignal, ViewportMetrics, ViewportSample, EXIT_APP_METHOD, READY_SOURCE_CANCELLED,
    READY_SOURCE_DOM,
};
pub use host::{
    DocumentAttributes, MemoryDocument, MemoryViewport, NoopDocumentAttributes,
    NoopViewportSource, PlatformHost, ViewportSource,
};
pub use nav::{
    NavController, NavDirection, NavEvent, NavEventKind, NavEventSink, RouteRecord,
    RouteSnapshot, RouterHistory,
};
pub use options::PlatformOptions;
pub use query::{QueryParams, PLATFORM_QUERY_KEY};
pub use registry::{LifecycleHook, ProfileDescriptor, ProfileMatcher, ProfileRegistry, VersionParser};
pub use resolve::{resolve, ProfileChain, ResolvedProfile};
pub use schedule::{ManualScheduler, ScheduledTask, TaskId, TaskScheduler};
pub use signals::PlatformSignals;
pub use version::{PlatformVersion, VersionParts};
