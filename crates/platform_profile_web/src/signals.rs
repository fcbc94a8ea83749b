//! Live detection signals read from `location`, `navigator`, and the user agent.

use platform_profile::{PlatformSignals, QueryParams};

/// Current `location.href`, or `None` outside a browser.
pub fn current_url() -> Option<String> {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()?.location().href().ok()
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        None
    }
}

/// Collects user agent, navigator platform, and query parameters from the running page.
///
/// Outside a browser every signal is empty, so resolution falls back to the default profile.
pub fn live_signals() -> PlatformSignals {
    let query = current_url()
        .map(|url| QueryParams::parse(&url))
        .unwrap_or_default();

    #[cfg(target_arch = "wasm32")]
    {
        let navigator = web_sys::window().map(|window| window.navigator());
        let user_agent = navigator
            .as_ref()
            .and_then(|nav| nav.user_agent().ok())
            .unwrap_or_default();
        let navigator_platform = navigator
            .as_ref()
            .and_then(|nav| nav.platform().ok())
            .unwrap_or_default();
        PlatformSignals::new(user_agent, navigator_platform, query)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        PlatformSignals::new("", "", query)
    }
}
