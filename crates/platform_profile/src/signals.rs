//! Live environment signals and the matcher helpers profile descriptors build on.

use regex::{Regex, RegexBuilder};

use crate::{query::PLATFORM_QUERY_KEY, version::VersionParts, QueryParams};

/// Snapshot of the environment signals consumed by profile matchers and version parsers.
#[derive(Debug, Clone, Default)]
pub struct PlatformSignals {
    user_agent: String,
    navigator_platform: String,
    query: QueryParams,
}

impl PlatformSignals {
    /// Builds a signal snapshot from the raw user agent, navigator platform, and URL query.
    pub fn new(
        user_agent: impl Into<String>,
        navigator_platform: impl Into<String>,
        query: QueryParams,
    ) -> Self {
        Self {
            user_agent: user_agent.into(),
            navigator_platform: navigator_platform.into(),
            query,
        }
    }

    /// Raw user-agent string.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Raw navigator platform identifier (for example `MacIntel`).
    pub fn navigator_platform(&self) -> &str {
        &self.navigator_platform
    }

    /// Parsed URL query captured at startup.
    pub fn query(&self) -> &QueryParams {
        &self.query
    }

    /// Returns the explicit `platform` query override when present and non-empty.
    pub fn platform_override(&self) -> Option<&str> {
        self.query
            .get(PLATFORM_QUERY_KEY)
            .filter(|value| !value.is_empty())
    }

    /// Returns whether `name` is one of the semicolon-delimited entries of `query_value`.
    pub fn test_query(query_value: &str, name: &str) -> bool {
        let name = name.to_lowercase();
        query_value
            .to_lowercase()
            .split(';')
            .any(|entry| entry == name)
    }

    /// Standard matcher: the query override decides when present, otherwise the lower-cased
    /// user agent must contain one of `at_least_has` and none of `must_not_have`.
    ///
    /// An empty `at_least_has` falls back to `[name]`.
    pub fn is_platform_match(
        &self,
        name: &str,
        at_least_has: &[&str],
        must_not_have: &[&str],
    ) -> bool {
        if let Some(value) = self.platform_override() {
            return Self::test_query(value, name);
        }

        let fallback = [name];
        let needles = if at_least_has.is_empty() {
            &fallback[..]
        } else {
            at_least_has
        };
        let user_agent = self.user_agent.to_lowercase();

        needles.iter().any(|needle| user_agent.contains(*needle))
            && !must_not_have
                .iter()
                .any(|needle| user_agent.contains(*needle))
    }

    /// Case-sensitive substring test against the raw user agent.
    pub fn test_user_agent(&self, needle: &str) -> bool {
        !self.user_agent.is_empty() && self.user_agent.contains(needle)
    }

    /// Case-insensitive regex test against the navigator platform string.
    pub fn test_navigator_platform(&self, pattern: &str) -> bool {
        match RegexBuilder::new(pattern).case_insensitive(true).build() {
            Ok(rgx) => rgx.is_match(&self.navigator_platform),
            Err(err) => {
                tracing::warn!("invalid navigator platform pattern `{pattern}`: {err}");
                false
            }
        }
    }

    /// Extracts version captures (groups 1..=3) from the user agent.
    pub fn match_user_agent_version(&self, pattern: &Regex) -> Option<VersionParts> {
        if self.user_agent.is_empty() {
            return None;
        }
        let captures = pattern.captures(&self.user_agent)?;
        let group = |index: usize| captures.get(index).map(|m| m.as_str().to_string());
        Some(VersionParts {
            major: group(1)?,
            minor: group(2),
            patch: group(3),
        })
    }
}
