//! Caller-supplied profile descriptors.

use std::{fmt, rc::Rc};

use serde_json::{Map, Value};

use crate::{version::VersionParts, Platform, PlatformSignals};

/// Matcher deciding whether live signals satisfy a profile.
pub type ProfileMatcher = Rc<dyn Fn(&PlatformSignals) -> bool>;

/// Version parser extracting raw version captures from live signals.
pub type VersionParser = Rc<dyn Fn(&PlatformSignals) -> Option<VersionParts>>;

/// Lifecycle hook invoked once per active profile during initialization.
pub type LifecycleHook = Rc<dyn Fn(&Platform)>;

/// Description of one runtime environment profile.
///
/// Every field is optional so a descriptor can also act as a partial override: see
/// [`ProfileDescriptor::merged_over`].
#[derive(Clone, Default)]
pub struct ProfileDescriptor {
    is_engine: Option<bool>,
    matcher: Option<ProfileMatcher>,
    superset: Option<String>,
    subsets: Option<Vec<String>>,
    settings: Option<Map<String, Value>>,
    version_parser: Option<VersionParser>,
    before_initialize: Option<LifecycleHook>,
    initialize: Option<LifecycleHook>,
}

impl ProfileDescriptor {
    /// Creates an empty descriptor that never matches.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the profile as a host shell/engine.
    pub fn engine(mut self) -> Self {
        self.is_engine = Some(true);
        self
    }

    /// Sets the engine flag explicitly.
    pub fn with_engine(mut self, is_engine: bool) -> Self {
        self.is_engine = Some(is_engine);
        self
    }

    /// Sets the matcher.
    pub fn matcher(mut self, matcher: impl Fn(&PlatformSignals) -> bool + 'static) -> Self {
        self.matcher = Some(Rc::new(matcher));
        self
    }

    /// Declares the more general profile this one extends.
    pub fn superset(mut self, name: impl Into<String>) -> Self {
        self.superset = Some(name.into());
        self
    }

    /// Declares the profiles that treat this one as their parent.
    pub fn subsets<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subsets = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Adds one settings entry.
    pub fn setting(mut self, key: impl Into<String>, value: Value) -> Self {
        self.settings
            .get_or_insert_with(Map::new)
            .insert(key.into(), value);
        self
    }

    /// Replaces the settings map. Non-object values clear the settings.
    pub fn settings(mut self, settings: Value) -> Self {
        self.settings = match settings {
            Value::Object(map) => Some(map),
            _ => None,
        };
        self
    }

    /// Sets the version parser.
    pub fn version_parser(
        mut self,
        parser: impl Fn(&PlatformSignals) -> Option<VersionParts> + 'static,
    ) -> Self {
        self.version_parser = Some(Rc::new(parser));
        self
    }

    /// Sets the hook run before `initialize`.
    pub fn before_initialize(mut self, hook: impl Fn(&Platform) + 'static) -> Self {
        self.before_initialize = Some(Rc::new(hook));
        self
    }

    /// Sets the initialization hook, the only place environment-specific setup belongs.
    pub fn initialize(mut self, hook: impl Fn(&Platform) + 'static) -> Self {
        self.initialize = Some(Rc::new(hook));
        self
    }

    /// Returns whether this profile is a host shell/engine.
    pub fn is_engine(&self) -> bool {
        self.is_engine.unwrap_or(false)
    }

    /// Returns the declared superset name.
    pub fn superset_name(&self) -> Option<&str> {
        self.superset.as_deref()
    }

    /// Returns the declared subset names.
    pub fn subset_names(&self) -> &[String] {
        self.subsets.as_deref().unwrap_or_default()
    }

    /// Returns whether `name` is declared as a subset.
    pub fn has_subset(&self, name: &str) -> bool {
        self.subset_names().iter().any(|subset| subset == name)
    }

    /// Returns the settings map, if any.
    pub fn settings_map(&self) -> Option<&Map<String, Value>> {
        self.settings.as_ref()
    }

    /// Evaluates the matcher; a descriptor without one never matches.
    pub fn matches(&self, signals: &PlatformSignals) -> bool {
        self.matcher
            .as_ref()
            .map(|matcher| matcher(signals))
            .unwrap_or(false)
    }

    /// Runs the version parser, if any.
    pub fn parse_version(&self, signals: &PlatformSignals) -> Option<VersionParts> {
        self.version_parser.as_ref().and_then(|parser| parser(signals))
    }

    pub(crate) fn before_initialize_hook(&self) -> Option<LifecycleHook> {
        self.before_initialize.clone()
    }

    pub(crate) fn initialize_hook(&self) -> Option<LifecycleHook> {
        self.initialize.clone()
    }

    /// Overlays `self` onto `base`: fields set on `self` win, unset fields are inherited,
    /// and settings merge key by key.
    pub fn merged_over(&self, base: &ProfileDescriptor) -> ProfileDescriptor {
        let settings = match (&base.settings, &self.settings) {
            (Some(base_settings), Some(own)) => {
                let mut merged = base_settings.clone();
                merged.extend(own.iter().map(|(k, v)| (k.clone(), v.clone())));
                Some(merged)
            }
            (base_settings, own) => own.clone().or_else(|| base_settings.clone()),
        };

        ProfileDescriptor {
            is_engine: self.is_engine.or(base.is_engine),
            matcher: self.matcher.clone().or_else(|| base.matcher.clone()),
            superset: self.superset.clone().or_else(|| base.superset.clone()),
            subsets: self.subsets.clone().or_else(|| base.subsets.clone()),
            settings,
            version_parser: self
                .version_parser
                .clone()
                .or_else(|| base.version_parser.clone()),
            before_initialize: self
                .before_initialize
                .clone()
                .or_else(|| base.before_initialize.clone()),
            initialize: self.initialize.clone().or_else(|| base.initialize.clone()),
        }
    }
}

impl fmt::Debug for ProfileDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProfileDescriptor")
            .field("is_engine", &self.is_engine)
            .field("has_matcher", &self.matcher.is_some())
            .field("superset", &self.superset)
            .field("subsets", &self.subsets)
            .field("settings", &self.settings)
            .field("has_version_parser", &self.version_parser.is_some())
            .field("has_before_initialize", &self.before_initialize.is_some())
            .field("has_initialize", &self.initialize.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::QueryParams;

    #[test]
    fn descriptor_without_matcher_never_matches() {
        let signals = PlatformSignals::new("anything", "", QueryParams::default());
        assert!(!ProfileDescriptor::new().matches(&signals));
        assert!(ProfileDescriptor::new().matcher(|_| true).matches(&signals));
    }

    #[test]
    fn override_fields_win_and_unset_fields_inherit() {
        let base = ProfileDescriptor::new()
            .matcher(|_| true)
            .superset("mobile")
            .subsets(["iphone", "ipad"])
            .settings(json!({"mode": "ios", "tabsHighlight": false}));
        let overlay = ProfileDescriptor::new()
            .superset("handheld")
            .setting("tabsHighlight", json!(true))
            .setting("swipeBack", json!(true));

        let merged = overlay.merged_over(&base);
        let signals = PlatformSignals::default();

        assert!(merged.matches(&signals));
        assert_eq!(merged.superset_name(), Some("handheld"));
        assert_eq!(merged.subset_names(), ["iphone", "ipad"]);
        assert!(!merged.is_engine());
        assert_eq!(
            Value::Object(merged.settings_map().cloned().expect("settings")),
            json!({"mode": "ios", "tabsHighlight": true, "swipeBack": true})
        );
    }

    #[test]
    fn explicit_false_engine_flag_overrides_base() {
        let base = ProfileDescriptor::new().engine();
        let merged = ProfileDescriptor::new().with_engine(false).merged_over(&base);
        assert!(!merged.is_engine());
        assert!(ProfileDescriptor::new().merged_over(&base).is_engine());
    }
}
