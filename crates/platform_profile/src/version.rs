//! Parsed platform version values.

use serde::{Deserialize, Serialize};

/// Raw version captures returned by a profile's version parser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionParts {
    /// Major version text.
    pub major: String,
    /// Minor version text, when captured.
    pub minor: Option<String>,
    /// Third (patch) version text, when captured.
    pub patch: Option<String>,
}

impl VersionParts {
    /// Builds parts from captured text.
    pub fn new(
        major: impl Into<String>,
        minor: Option<impl Into<String>>,
        patch: Option<impl Into<String>>,
    ) -> Self {
        Self {
            major: major.into(),
            minor: minor.map(Into::into),
            patch: patch.map(Into::into),
        }
    }
}

/// Version recorded for one active platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformVersion {
    /// Dotted text form (`major.minor` or `major.minor.patch`).
    pub text: String,
    /// `major.minor` as a float, for coarse comparisons.
    pub num: f64,
    /// Major component.
    pub major: u32,
    /// Minor component (`0` when not captured).
    pub minor: u32,
    /// Patch component, when captured.
    pub patch: Option<u32>,
}

impl PlatformVersion {
    /// Converts raw captures into a version.
    ///
    /// Returns `None` when the major or a captured minor component has no leading digits.
    pub fn from_parts(parts: &VersionParts) -> Option<Self> {
        let major = parse_leading_u32(&parts.major)?;
        let minor = match parts.minor.as_deref() {
            Some(raw) => parse_leading_u32(raw)?,
            None => 0,
        };
        let patch = parts.patch.as_deref().and_then(parse_leading_u32);
        let text = match patch {
            Some(patch) => format!("{major}.{minor}.{patch}"),
            None => format!("{major}.{minor}"),
        };
        let num = format!("{major}.{minor}")
            .parse::<f64>()
            .unwrap_or(f64::from(major));
        Some(Self {
            text,
            num,
            major,
            minor,
            patch,
        })
    }
}

fn parse_leading_u32(raw: &str) -> Option<u32> {
    let digits: String = raw
        .trim_start()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}
