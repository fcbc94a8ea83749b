//! URL query-string reader used for explicit platform overrides.

use std::collections::BTreeMap;

/// Query key carrying a semicolon-delimited explicit platform override (`?platform=ios;iphone`).
pub const PLATFORM_QUERY_KEY: &str = "platform";

/// Case-insensitive view over the query component of a URL.
///
/// Keys are stored lower-cased; values keep their raw text up to the next `&` and never
/// include a fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    data: BTreeMap<String, String>,
}

impl QueryParams {
    /// Parses the query component of `url`.
    pub fn parse(url: &str) -> Self {
        let mut params = Self::default();
        params.parse_into(url);
        params
    }

    fn parse_into(&mut self, url: &str) {
        let Some(start) = url.find('?') else {
            return;
        };

        for pair in url[start + 1..].split('&') {
            // `=x` and bare `flag` pairs are malformed.
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            if key.is_empty() {
                continue;
            }
            let value = value.split('#').next().unwrap_or_default();
            self.data.insert(key.to_lowercase(), value.to_string());
        }
    }

    /// Returns the value for `key`, matching keys case-insensitively.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.data.get(&key.to_lowercase()).map(String::as_str)
    }

    /// Returns whether no pairs were parsed.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the number of parsed pairs.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Iterates parsed pairs ordered by lower-cased key.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.data.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
