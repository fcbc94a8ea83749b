//! Browser bootstrap for the platform facade.

use std::rc::Rc;

use platform_profile::{Platform, PlatformHost, PlatformOptions, ProfileRegistry, READY_SOURCE_DOM};

use crate::{
    document::{probe_css_props, WebDocumentAttributes},
    events::{listen_window_resize, on_dom_ready},
    scheduler::TimeoutScheduler,
    signals::live_signals,
    viewport::WindowViewport,
};

/// Installs the panic hook and the `tracing` console subscriber. Safe to call repeatedly.
pub fn install_diagnostics() {
    #[cfg(target_arch = "wasm32")]
    {
        static INSTALL: std::sync::Once = std::sync::Once::new();
        INSTALL.call_once(|| {
            console_error_panic_hook::set_once();
            tracing_wasm::set_as_global_default();
        });
    }
}

/// Host bundle backed by the live browser window.
pub fn web_host() -> PlatformHost {
    PlatformHost {
        viewport: Rc::new(WindowViewport),
        document: Rc::new(WebDocumentAttributes),
        scheduler: Rc::new(TimeoutScheduler::new()),
    }
}

/// Builds and bootstraps the platform from the running page.
///
/// Readiness fires with source `"dom"` once the document is parsed, unless an active
/// profile deferred it from its `initialize` hook.
pub fn setup_platform(registry: ProfileRegistry, options: PlatformOptions) -> Platform {
    install_diagnostics();

    let platform = Platform::new(registry, live_signals(), options, web_host());
    platform.set_css_props(probe_css_props());
    platform.prepare();
    platform.init();

    if platform.is_ready_deferred() {
        tracing::debug!("platform readiness deferred by an active profile");
    } else {
        let ready = platform.clone();
        on_dom_ready(move || {
            ready.trigger_ready(READY_SOURCE_DOM);
        });
    }

    listen_window_resize(&platform);
    platform
}

/// Like [`setup_platform`], with caller `overrides` merged field by field onto `defaults`.
pub fn setup_platform_with_overrides(
    defaults: &ProfileRegistry,
    overrides: &ProfileRegistry,
    options: PlatformOptions,
) -> Platform {
    setup_platform(defaults.merge_overrides(overrides), options)
}
