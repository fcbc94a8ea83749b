//! Leptos context helpers for sharing one [`Platform`] across components.

use leptos::{provide_context, use_context};
use platform_profile::Platform;

/// Makes `platform` available to descendant components.
pub fn provide_platform(platform: Platform) {
    provide_context(platform);
}

/// Returns the platform provided by an ancestor, if any.
pub fn try_use_platform() -> Option<Platform> {
    use_context::<Platform>()
}

/// Returns the platform provided by an ancestor.
pub fn use_platform() -> Platform {
    use_context::<Platform>().expect("Platform not provided")
}
