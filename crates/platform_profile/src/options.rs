//! Startup options for [`crate::Platform`].

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::PlatformError;

/// Profile synthesized when nothing non-engine matches.
pub const DEFAULT_PROFILE: &str = "mobile";
/// Initial text direction.
pub const DEFAULT_DIR: &str = "ltr";
/// Initial document language.
pub const DEFAULT_LANG: &str = "zh-cn";
/// Quiet period before resize callbacks run.
pub const DEFAULT_RESIZE_DEBOUNCE_MS: u64 = 200;

/// Platform startup options. Missing JSON fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformOptions {
    /// Fallback profile name.
    pub default_profile: String,
    /// Initial text direction (`ltr` or `rtl`).
    pub dir: String,
    /// Initial language tag.
    pub lang: String,
    /// Whether `dir`/`lang` changes are reflected onto the root document element.
    pub update_document: bool,
    /// Resize debounce in milliseconds.
    pub resize_debounce_ms: u64,
}

impl Default for PlatformOptions {
    fn default() -> Self {
        Self {
            default_profile: DEFAULT_PROFILE.to_string(),
            dir: DEFAULT_DIR.to_string(),
            lang: DEFAULT_LANG.to_string(),
            update_document: true,
            resize_debounce_ms: DEFAULT_RESIZE_DEBOUNCE_MS,
        }
    }
}

impl PlatformOptions {
    /// Decodes options from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::InvalidOptions`] when the text is not a JSON object of the
    /// expected shape.
    pub fn from_json_str(text: &str) -> Result<Self, PlatformError> {
        serde_json::from_str(text).map_err(|err| PlatformError::InvalidOptions(err.to_string()))
    }

    /// Resize debounce as a [`Duration`].
    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let options = PlatformOptions::from_json_str(r#"{"lang":"en-us"}"#).expect("parse");
        assert_eq!(
            options,
            PlatformOptions {
                lang: "en-us".to_string(),
                ..PlatformOptions::default()
            }
        );
        assert_eq!(options.resize_debounce(), Duration::from_millis(200));
    }

    #[test]
    fn malformed_json_is_invalid_options() {
        let err = PlatformOptions::from_json_str(r#"{"resize_debounce_ms":"soon"}"#)
            .expect_err("type mismatch");
        assert!(matches!(err, PlatformError::InvalidOptions(_)));
    }
}
