//! Vendor-prefixed CSS property names resolved once at startup.

use serde::{Deserialize, Serialize};

const TRANSFORM_CANDIDATES: [&str; 4] = [
    "webkitTransform",
    "-webkit-transform",
    "webkit-transform",
    "transform",
];
const TRANSITION_CANDIDATES: [&str; 2] = ["webkitTransition", "transition"];

/// CSS property and event names usable on the current engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CssProps {
    /// Supported transform property, if any.
    pub transform: Option<String>,
    /// Supported transition property, if any.
    pub transition: Option<String>,
    /// `transition-duration`, webkit-prefixed when needed.
    pub transition_duration: String,
    /// `transition-timing-function`, webkit-prefixed when needed.
    pub transition_timing_fn: String,
    /// `transition-delay`, webkit-prefixed when needed.
    pub transition_delay: String,
    /// Space-separated transition end event names.
    pub transition_end: String,
    /// `transform-origin`, webkit-prefixed when needed.
    pub transform_origin: String,
    /// Animation delay style key.
    pub animation_delay: String,
}

impl CssProps {
    /// Derives names from `probe`, which reports whether a style key is supported.
    pub fn detect(probe: impl Fn(&str) -> bool) -> Self {
        let transform = TRANSFORM_CANDIDATES
            .iter()
            .find(|key| probe(**key))
            .map(|key| key.to_string());
        let transition = TRANSITION_CANDIDATES
            .iter()
            .find(|key| probe(**key))
            .map(|key| key.to_string());
        let webkit = transition
            .as_deref()
            .is_some_and(|name| name.contains("webkit"));
        let prefix = if webkit { "-webkit-" } else { "" };

        Self {
            transform,
            transition,
            transition_duration: format!("{prefix}transition-duration"),
            transition_timing_fn: format!("{prefix}transition-timing-function"),
            transition_delay: format!("{prefix}transition-delay"),
            transition_end: if webkit {
                "webkitTransitionEnd transitionend".to_string()
            } else {
                "transitionend".to_string()
            },
            transform_origin: format!("{prefix}transform-origin"),
            animation_delay: if webkit {
                "webkitAnimationDelay".to_string()
            } else {
                "animationDelay".to_string()
            },
        }
    }

    /// Returns whether transitions need the webkit prefix.
    pub fn is_webkit(&self) -> bool {
        self.transition
            .as_deref()
            .is_some_and(|name| name.contains("webkit"))
    }
}
