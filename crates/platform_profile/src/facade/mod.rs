//! The platform facade: the single object application code queries and registers against.
//!
//! A [`Platform`] is a cheap clone handle. Lifecycle hooks receive `&Platform` while
//! initialization is running and may call back into any facade method; no internal borrow
//! is held across a hook or callback.
//!
//! Startup order matches [`Platform::bootstrap`]:
//!
//! 1. apply the configured `dir` and `lang`,
//! 2. take the first viewport reading,
//! 3. resolve the profile chain and run every profile's hooks root to leaf,
//! 4. fulfil readiness with source `"dom"` unless a hook called [`Platform::defer_ready`].

mod back_button;
mod callbacks;
mod methods;
mod ready;
mod viewport;

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

pub use back_button::{BackButtonActions, BackButtonHandler, BackButtonRegistration};
pub use callbacks::{CallbackList, CallbackRegistration, PlatformCallback};
pub use methods::{MethodRegistry, NativeMethod};
pub use ready::{ReadyFuture, ReadySignal, READY_SOURCE_CANCELLED};
use serde_json::{Map, Value};
pub use viewport::{ViewportMetrics, ViewportSample};

use crate::{
    error::run_logged,
    resolve::{resolve, ProfileChain},
    schedule::TaskId,
    CssProps, PlatformError, PlatformHost, PlatformOptions, PlatformSignals, PlatformVersion,
    ProfileDescriptor, ProfileRegistry,
};

/// Ready source used when no profile defers readiness.
pub const READY_SOURCE_DOM: &str = "dom";
/// Named method invoked by [`Platform::exit_app`].
pub const EXIT_APP_METHOD: &str = "exitApp";

struct PlatformInner {
    options: PlatformOptions,
    host: PlatformHost,
    signals: PlatformSignals,
    registry: ProfileRegistry,
    chain: RefCell<Option<ProfileChain>>,
    platforms: RefCell<Vec<String>>,
    versions: RefCell<Vec<(String, Option<PlatformVersion>)>>,
    settings: RefCell<Map<String, Value>>,
    dir: RefCell<String>,
    lang: RefCell<String>,
    net_type: RefCell<Option<String>>,
    css: RefCell<CssProps>,
    metrics: Cell<ViewportMetrics>,
    resize_task: Cell<Option<TaskId>>,
    resize_callbacks: CallbackList,
    pause_callbacks: CallbackList,
    resume_callbacks: CallbackList,
    back_actions: BackButtonActions,
    methods: MethodRegistry,
    ready: ReadySignal,
    ready_deferred: Cell<bool>,
}

/// Runtime platform facade.
#[derive(Clone)]
pub struct Platform {
    inner: Rc<PlatformInner>,
}

impl Platform {
    /// Creates an uninitialized facade. Call [`Platform::bootstrap`] (or use
    /// [`Platform::setup`]) before querying the active profiles.
    pub fn new(
        registry: ProfileRegistry,
        signals: PlatformSignals,
        options: PlatformOptions,
        host: PlatformHost,
    ) -> Self {
        Self {
            inner: Rc::new(PlatformInner {
                options,
                host,
                signals,
                registry,
                chain: RefCell::new(None),
                platforms: RefCell::new(Vec::new()),
                versions: RefCell::new(Vec::new()),
                settings: RefCell::new(Map::new()),
                dir: RefCell::new(String::new()),
                lang: RefCell::new(String::new()),
                net_type: RefCell::new(None),
                css: RefCell::new(CssProps::default()),
                metrics: Cell::new(ViewportMetrics::default()),
                resize_task: Cell::new(None),
                resize_callbacks: CallbackList::default(),
                pause_callbacks: CallbackList::default(),
                resume_callbacks: CallbackList::default(),
                back_actions: BackButtonActions::default(),
                methods: MethodRegistry::default(),
                ready: ReadySignal::default(),
                ready_deferred: Cell::new(false),
            }),
        }
    }

    /// Creates and fully bootstraps a facade.
    pub fn setup(
        registry: ProfileRegistry,
        signals: PlatformSignals,
        options: PlatformOptions,
        host: PlatformHost,
    ) -> Self {
        let platform = Self::new(registry, signals, options, host);
        platform.bootstrap();
        platform
    }

    /// Runs the full startup sequence.
    pub fn bootstrap(&self) {
        self.prepare();
        self.init();
        self.before_ready();
    }

    /// Applies the configured direction and language and takes the first viewport reading.
    pub fn prepare(&self) {
        let options = &self.inner.options;
        self.set_dir(&options.dir, options.update_document);
        self.set_lang(&options.lang, options.update_document);
        self.measure_viewport();
    }

    /// Resolves the profile chain from the registry and initializes it.
    ///
    /// Calling this again rebuilds everything from scratch.
    pub fn init(&self) {
        let chain = resolve(
            &self.inner.registry,
            &self.inner.signals,
            &self.inner.options.default_profile,
        );
        self.initialize_chain(&chain);
    }

    /// Runs each profile's hooks root to leaf, recording names, versions, and settings.
    ///
    /// A profile's name is appended after its own hooks ran, so a hook observes only the
    /// profiles above it.
    pub fn initialize_chain(&self, chain: &ProfileChain) {
        self.inner.platforms.borrow_mut().clear();
        self.inner.versions.borrow_mut().clear();
        self.inner.settings.borrow_mut().clear();
        self.inner.ready_deferred.set(false);
        *self.inner.chain.borrow_mut() = Some(chain.clone());

        for profile in chain.profiles() {
            let descriptor = self.inner.registry.get(&profile.name).cloned();

            if let Some(hook) = descriptor.as_ref().and_then(|d| d.before_initialize_hook()) {
                run_logged("before-initialize", || hook(self));
            }
            if let Some(hook) = descriptor.as_ref().and_then(|d| d.initialize_hook()) {
                run_logged("initialize", || hook(self));
            }

            self.inner.platforms.borrow_mut().push(profile.name.clone());

            let version = descriptor
                .as_ref()
                .and_then(|d| d.parse_version(&self.inner.signals))
                .and_then(|parts| PlatformVersion::from_parts(&parts));
            self.inner
                .versions
                .borrow_mut()
                .push((profile.name.clone(), version));

            if let Some(settings) = descriptor.as_ref().and_then(|d| d.settings_map()) {
                let mut merged = self.inner.settings.borrow_mut();
                for (key, value) in settings {
                    merged.insert(key.clone(), value.clone());
                }
            }
        }
    }

    /// Fulfils readiness with `"dom"` unless a hook deferred it.
    pub fn before_ready(&self) {
        if self.is_ready_deferred() {
            tracing::debug!("platform readiness deferred by an active profile");
            return;
        }
        self.trigger_ready(READY_SOURCE_DOM);
    }

    /// Returns whether `name` is one of the active profiles.
    pub fn is(&self, name: &str) -> bool {
        self.inner.platforms.borrow().iter().any(|p| p == name)
    }

    /// Active profile names, most general first.
    pub fn platforms(&self) -> Vec<String> {
        self.inner.platforms.borrow().clone()
    }

    /// Resolved chain from the last initialization.
    pub fn chain(&self) -> Option<ProfileChain> {
        self.inner.chain.borrow().clone()
    }

    /// Name of the active shell engine, if any.
    pub fn engine(&self) -> Option<String> {
        self.inner
            .chain
            .borrow()
            .as_ref()
            .and_then(|chain| chain.engine())
            .map(|profile| profile.name.clone())
    }

    /// Parsed version per active profile in chain order.
    pub fn versions(&self) -> Vec<(String, Option<PlatformVersion>)> {
        self.inner.versions.borrow().clone()
    }

    /// Parsed version of `name`, when it is active and its parser produced one.
    pub fn version_of(&self, name: &str) -> Option<PlatformVersion> {
        self.inner
            .versions
            .borrow()
            .iter()
            .find(|(profile, _)| profile == name)
            .and_then(|(_, version)| version.clone())
    }

    /// First parsed version in chain order.
    pub fn version(&self) -> Option<PlatformVersion> {
        self.inner
            .versions
            .borrow()
            .iter()
            .find_map(|(_, version)| version.clone())
    }

    /// Future resolving to the ready source once the platform is ready.
    pub fn ready(&self) -> ReadyFuture {
        self.inner.ready.wait()
    }

    /// Fulfils readiness with `source`. Later calls are ignored.
    pub fn trigger_ready(&self, source: &str) -> bool {
        let fulfilled = self.inner.ready.trigger(source);
        if !fulfilled {
            tracing::debug!("platform already ready; ignoring ready source `{source}`");
        }
        fulfilled
    }

    /// Stops [`Platform::before_ready`] from fulfilling readiness. The caller becomes
    /// responsible for calling [`Platform::trigger_ready`].
    pub fn defer_ready(&self) {
        self.inner.ready_deferred.set(true);
    }

    /// Returns whether readiness was deferred.
    pub fn is_ready_deferred(&self) -> bool {
        self.inner.ready_deferred.get()
    }

    /// Returns whether readiness has been fulfilled.
    pub fn is_ready(&self) -> bool {
        self.inner.ready.is_ready()
    }

    /// Sets the text direction, stored lower-cased, optionally reflecting it onto the document.
    pub fn set_dir(&self, dir: &str, update_document: bool) {
        let dir = dir.to_lowercase();
        if update_document {
            self.write_document_attribute("dir", &dir);
        }
        *self.inner.dir.borrow_mut() = dir;
    }

    /// Current text direction.
    pub fn dir(&self) -> String {
        self.inner.dir.borrow().clone()
    }

    /// Returns whether the text direction is right-to-left.
    pub fn is_rtl(&self) -> bool {
        *self.inner.dir.borrow() == "rtl"
    }

    /// Sets the language tag, optionally reflecting it onto the document.
    pub fn set_lang(&self, lang: &str, update_document: bool) {
        if update_document {
            self.write_document_attribute("lang", lang);
        }
        *self.inner.lang.borrow_mut() = lang.to_string();
    }

    /// Current language tag.
    pub fn lang(&self) -> String {
        self.inner.lang.borrow().clone()
    }

    /// Records the network type reported by the host shell.
    pub fn set_net_type(&self, net_type: impl Into<String>) {
        *self.inner.net_type.borrow_mut() = Some(net_type.into());
    }

    /// Last reported network type.
    pub fn net_type(&self) -> Option<String> {
        self.inner.net_type.borrow().clone()
    }

    fn write_document_attribute(&self, name: &str, value: &str) {
        if let Err(err) = self.inner.host.document.set_document_attribute(name, value) {
            tracing::warn!("document attribute `{name}` update failed: {err}");
        }
    }

    fn measure_viewport(&self) -> ViewportMetrics {
        let mut metrics = self.inner.metrics.get();
        if let Some(sample) = self.inner.host.viewport.sample() {
            metrics.measure(sample);
            self.inner.metrics.set(metrics);
        }
        metrics
    }

    /// Viewport width for the current orientation.
    pub fn width(&self) -> u32 {
        self.measure_viewport().width()
    }

    /// Viewport height for the current orientation.
    pub fn height(&self) -> u32 {
        self.measure_viewport().height()
    }

    /// Returns whether the viewport is in portrait orientation.
    pub fn is_portrait(&self) -> bool {
        self.measure_viewport().is_portrait()
    }

    /// Returns whether the viewport is in landscape orientation.
    pub fn is_landscape(&self) -> bool {
        !self.is_portrait()
    }

    /// Registers a callback run after a debounced resize.
    pub fn on_resize(&self, callback: impl Fn() + 'static) -> CallbackRegistration {
        self.inner.resize_callbacks.register(Rc::new(callback))
    }

    /// Host resize entry point. Restarts the debounce window; when it elapses the cached
    /// orientation is cleared and resize callbacks run.
    pub fn window_resize(&self) {
        let scheduler = Rc::clone(&self.inner.host.scheduler);
        if let Some(pending) = self.inner.resize_task.take() {
            scheduler.cancel(pending);
        }

        let weak = Rc::downgrade(&self.inner);
        let id = scheduler.schedule(
            self.inner.options.resize_debounce(),
            Box::new(move || {
                let Some(inner) = weak.upgrade() else {
                    return;
                };
                inner.resize_task.set(None);
                let mut metrics = inner.metrics.get();
                metrics.invalidate();
                inner.metrics.set(metrics);
                inner.resize_callbacks.dispatch("resize");
            }),
        );
        self.inner.resize_task.set(Some(id));
    }

    /// Registers a back-button action at `priority`.
    pub fn register_back_button_action(
        &self,
        action: impl Fn() + 'static,
        priority: i32,
    ) -> BackButtonRegistration {
        self.inner.back_actions.register(Rc::new(action), priority)
    }

    /// Runs the highest-priority back-button action. Returns whether one ran.
    pub fn run_back_button_action(&self) -> bool {
        self.inner.back_actions.run()
    }

    /// Host back-button event entry point.
    pub fn back_button(&self) {
        if !self.run_back_button_action() {
            tracing::debug!("back button pressed with no registered action");
        }
    }

    /// Installs a named native-bridge method, replacing (with a warning) any previous one.
    pub fn register_method(&self, name: &str, method: impl Fn(Value) + 'static) {
        if name.is_empty() {
            return;
        }
        if self.inner.methods.contains(name) {
            tracing::warn!(
                "`{name}` had already been registered; active platforms: {:?}",
                self.inner.platforms.borrow()
            );
        }
        self.inner.methods.register(name, Rc::new(method));
    }

    /// Calls a named method, logging a warning when it is not registered.
    pub fn invoke(&self, name: &str, arg: Value) {
        if let Err(err) = self.try_invoke(name, arg) {
            tracing::warn!(
                "{err}; active platforms: {:?}",
                self.inner.platforms.borrow()
            );
        }
    }

    /// Calls a named method.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::MethodNotRegistered`] when nothing is registered under `name`.
    pub fn try_invoke(&self, name: &str, arg: Value) -> Result<(), PlatformError> {
        self.inner.methods.invoke(name, arg)
    }

    /// Returns whether a method is registered under `name`.
    pub fn has_method(&self, name: &str) -> bool {
        self.inner.methods.contains(name)
    }

    /// Raw user-agent string.
    pub fn user_agent(&self) -> &str {
        self.inner.signals.user_agent()
    }

    /// Raw navigator platform string.
    pub fn navigator_platform(&self) -> &str {
        self.inner.signals.navigator_platform()
    }

    /// Live detection signals.
    pub fn signals(&self) -> &PlatformSignals {
        &self.inner.signals
    }

    /// Query-string value for `key` (case-insensitive).
    pub fn query_param(&self, key: &str) -> Option<String> {
        self.inner.signals.query().get(key).map(str::to_string)
    }

    /// Settings merged over the active chain, leaf entries winning.
    pub fn settings(&self) -> Map<String, Value> {
        self.inner.settings.borrow().clone()
    }

    /// One merged setting.
    pub fn setting(&self, key: &str) -> Option<Value> {
        self.inner.settings.borrow().get(key).cloned()
    }

    /// Descriptor registry this facade resolves against.
    pub fn registry(&self) -> &ProfileRegistry {
        &self.inner.registry
    }

    /// Descriptor registered under `name`.
    pub fn profile_config(&self, name: &str) -> Option<ProfileDescriptor> {
        self.inner.registry.get(name).cloned()
    }

    /// Startup options.
    pub fn options(&self) -> &PlatformOptions {
        &self.inner.options
    }

    /// CSS property names probed at startup.
    pub fn css(&self) -> CssProps {
        self.inner.css.borrow().clone()
    }

    /// Stores probed CSS property names.
    pub fn set_css_props(&self, css: CssProps) {
        *self.inner.css.borrow_mut() = css;
    }

    /// Asks the host shell to close the app through the `exitApp` method.
    pub fn exit_app(&self) {
        if self.has_method(EXIT_APP_METHOD) {
            self.invoke(EXIT_APP_METHOD, Value::Null);
        } else {
            tracing::debug!("exit requested but no shell registered `{EXIT_APP_METHOD}`");
        }
    }

    /// Registers a callback for the app moving to the background.
    pub fn on_pause(&self, callback: impl Fn() + 'static) -> CallbackRegistration {
        self.inner.pause_callbacks.register(Rc::new(callback))
    }

    /// Registers a callback for the app returning to the foreground.
    pub fn on_resume(&self, callback: impl Fn() + 'static) -> CallbackRegistration {
        self.inner.resume_callbacks.register(Rc::new(callback))
    }

    /// Host pause event entry point.
    pub fn pause(&self) {
        self.inner.pause_callbacks.dispatch("pause");
    }

    /// Host resume event entry point.
    pub fn resume(&self) {
        self.inner.resume_callbacks.dispatch("resume");
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use futures::{executor::block_on, FutureExt};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::{ManualScheduler, MemoryDocument, MemoryViewport, QueryParams, VersionParts};

    const IPHONE_UA: &str =
        "Mozilla/5.0 (iPhone; CPU iPhone OS 10_3_1 like Mac OS X) AppleWebKit/603.1.30 Mobile/14E304";
    const WECHAT_UA: &str =
        "Mozilla/5.0 (iPhone; CPU iPhone OS 10_3_1 like Mac OS X) Mobile/14E304 MicroMessenger/6.5.7";

    fn registry() -> ProfileRegistry {
        ProfileRegistry::new()
            .with(
                "mobile",
                ProfileDescriptor::new()
                    .setting("tabsPlacement", json!("bottom"))
                    .setting("hideNavBar", json!(false)),
            )
            .with(
                "ios",
                ProfileDescriptor::new()
                    .superset("mobile")
                    .subsets(["iphone"])
                    .setting("tabsPlacement", json!("top"))
                    .matcher(|s| s.is_platform_match("ios", &["iphone", "ipad", "ipod"], &[]))
                    .version_parser(|s| {
                        let pattern = regex::Regex::new(r"OS (\d+)_(\d+)(?:_(\d+))?").ok()?;
                        s.match_user_agent_version(&pattern)
                    }),
            )
            .with(
                "iphone",
                ProfileDescriptor::new().matcher(|s| s.is_platform_match("iphone", &[], &[])),
            )
            .with(
                "wechat",
                ProfileDescriptor::new()
                    .engine()
                    .matcher(|s| s.test_user_agent("MicroMessenger"))
                    .version_parser(|_| Some(VersionParts::new("6", Some("5"), Some("7"))))
                    .initialize(|platform| {
                        platform.defer_ready();
                        platform.register_method("share", |_| {});
                    }),
            )
    }

    fn signals(user_agent: &str, url: &str) -> PlatformSignals {
        PlatformSignals::new(user_agent, "iPhone", QueryParams::parse(url))
    }

    struct Harness {
        scheduler: ManualScheduler,
        viewport: MemoryViewport,
        document: MemoryDocument,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                scheduler: ManualScheduler::new(),
                viewport: MemoryViewport::new(ViewportSample::new(375, 667)),
                document: MemoryDocument::default(),
            }
        }

        fn host(&self) -> PlatformHost {
            PlatformHost {
                viewport: Rc::new(self.viewport.clone()),
                document: Rc::new(self.document.clone()),
                scheduler: Rc::new(self.scheduler.clone()),
            }
        }

        fn setup(&self, registry: ProfileRegistry, signals: PlatformSignals) -> Platform {
            Platform::setup(registry, signals, PlatformOptions::default(), self.host())
        }
    }

    #[test]
    fn iphone_chain_versions_and_settings() {
        let harness = Harness::new();
        let platform = harness.setup(registry(), signals(IPHONE_UA, "https://app.test/"));

        assert_eq!(platform.platforms(), ["mobile", "ios", "iphone"]);
        assert!(platform.is("ios"));
        assert!(!platform.is("wechat"));
        assert_eq!(platform.engine(), None);

        let ios = platform.version_of("ios").expect("ios version");
        assert_eq!(ios.text, "10.3.1");
        assert_eq!((ios.major, ios.minor, ios.patch), (10, 3, Some(1)));
        assert_eq!(platform.version(), Some(ios));
        assert_eq!(platform.version_of("iphone"), None);

        assert_eq!(platform.setting("tabsPlacement"), Some(json!("top")));
        assert_eq!(platform.setting("hideNavBar"), Some(json!(false)));
    }

    #[test]
    fn readiness_defaults_to_dom() {
        let harness = Harness::new();
        let platform = harness.setup(registry(), signals(IPHONE_UA, ""));

        assert!(platform.is_ready());
        assert_eq!(block_on(platform.ready()), READY_SOURCE_DOM);
        assert!(!platform.trigger_ready("late"));
    }

    #[test]
    fn engine_hook_defers_readiness_and_registers_methods() {
        let harness = Harness::new();
        let platform = harness.setup(registry(), signals(WECHAT_UA, ""));

        assert_eq!(platform.platforms(), ["wechat", "mobile", "ios", "iphone"]);
        assert_eq!(platform.engine().as_deref(), Some("wechat"));
        assert_eq!(platform.version().map(|v| v.text), Some("6.5.7".to_string()));
        assert!(platform.has_method("share"));

        let ready = platform.ready();
        assert!(ready.clone().now_or_never().is_none());
        assert!(platform.trigger_ready("wechat-bridge"));
        assert_eq!(block_on(ready), "wechat-bridge");
    }

    #[test]
    fn query_override_forces_profiles() {
        let harness = Harness::new();
        let platform = harness.setup(
            registry(),
            signals(
                "Mozilla/5.0 (X11; Linux x86_64)",
                "https://app.test/?platform=wechat;ios",
            ),
        );

        assert_eq!(platform.platforms(), ["wechat", "mobile", "ios"]);
        assert_eq!(
            platform.query_param("PLATFORM").as_deref(),
            Some("wechat;ios")
        );
    }

    #[test]
    fn unmatched_signals_fall_back_to_default_profile() {
        let harness = Harness::new();
        let platform = harness.setup(registry(), signals("curl/8.0", ""));
        assert_eq!(platform.platforms(), ["mobile"]);

        let empty = harness.setup(ProfileRegistry::new(), signals("curl/8.0", ""));
        assert_eq!(empty.platforms(), ["mobile"]);
        assert_eq!(empty.chain().map(|c| c.len()), Some(1));
    }

    #[test]
    fn hooks_see_only_profiles_above_them() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let before = Rc::clone(&seen);
        let during = Rc::clone(&seen);
        let registry = ProfileRegistry::new()
            .with("base", ProfileDescriptor::new().matcher(|_| true).subsets(["leaf"]))
            .with(
                "leaf",
                ProfileDescriptor::new()
                    .matcher(|_| true)
                    .before_initialize(move |p| before.borrow_mut().push(("before", p.platforms())))
                    .initialize(move |p| during.borrow_mut().push(("init", p.platforms()))),
            );

        let harness = Harness::new();
        let platform = harness.setup(registry, signals("", ""));

        let base = vec!["base".to_string()];
        assert_eq!(*seen.borrow(), [("before", base.clone()), ("init", base)]);
        assert_eq!(platform.platforms(), ["base", "leaf"]);
    }

    #[test]
    fn panicking_hook_does_not_abort_initialization() {
        let registry = ProfileRegistry::new().with(
            "fragile",
            ProfileDescriptor::new()
                .matcher(|_| true)
                .initialize(|_| panic!("bridge unavailable")),
        );

        let harness = Harness::new();
        let platform = harness.setup(registry, signals("", ""));

        assert_eq!(platform.platforms(), ["fragile"]);
        assert!(platform.is_ready());
    }

    #[test]
    fn reinit_rebuilds_state_from_scratch() {
        let harness = Harness::new();
        let platform = harness.setup(registry(), signals(IPHONE_UA, ""));
        platform.init();
        assert_eq!(platform.platforms(), ["mobile", "ios", "iphone"]);
        assert_eq!(platform.versions().len(), 3);
    }

    #[test]
    fn dir_and_lang_reflect_into_document() {
        let harness = Harness::new();
        let platform = harness.setup(registry(), signals(IPHONE_UA, ""));

        assert_eq!(platform.dir(), "ltr");
        assert_eq!(platform.lang(), "zh-cn");
        assert_eq!(harness.document.attribute("lang").as_deref(), Some("zh-cn"));

        platform.set_dir("RTL", true);
        assert!(platform.is_rtl());
        assert_eq!(harness.document.attribute("dir").as_deref(), Some("rtl"));

        platform.set_lang("ar", false);
        assert_eq!(platform.lang(), "ar");
        assert_eq!(harness.document.attribute("lang").as_deref(), Some("zh-cn"));

        assert_eq!(platform.net_type(), None);
        platform.set_net_type("wifi");
        assert_eq!(platform.net_type().as_deref(), Some("wifi"));
    }

    #[test]
    fn resize_is_debounced_and_remeasures() {
        let harness = Harness::new();
        let platform = harness.setup(registry(), signals(IPHONE_UA, ""));
        assert!(platform.is_portrait());
        assert_eq!(platform.width(), 375);

        let fired = Rc::new(Cell::new(0));
        let counter = Rc::clone(&fired);
        let registration = platform.on_resize(move || counter.set(counter.get() + 1));

        harness.viewport.set(ViewportSample::new(667, 375));
        platform.window_resize();
        harness.scheduler.advance(Duration::from_millis(150));
        platform.window_resize();
        harness.scheduler.advance(Duration::from_millis(150));
        assert_eq!(fired.get(), 0);

        harness.scheduler.advance(Duration::from_millis(50));
        assert_eq!(fired.get(), 1);
        assert!(platform.is_landscape());
        assert_eq!((platform.width(), platform.height()), (667, 375));

        assert!(registration.unregister());
        platform.window_resize();
        harness.scheduler.advance(Duration::from_millis(200));
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn back_button_runs_highest_priority_action() {
        let harness = Harness::new();
        let platform = harness.setup(registry(), signals(IPHONE_UA, ""));
        let log = Rc::new(RefCell::new(Vec::new()));
        for priority in [1, 5, 3] {
            let log = Rc::clone(&log);
            platform.register_back_button_action(move || log.borrow_mut().push(priority), priority);
        }

        platform.back_button();
        assert_eq!(*log.borrow(), [5]);
    }

    #[test]
    fn panicking_back_action_leaves_platform_usable() {
        let harness = Harness::new();
        let platform = harness.setup(registry(), signals(IPHONE_UA, ""));
        platform.register_back_button_action(|| panic!("back handler failed"), 1);

        platform.back_button();
        platform.back_button();

        assert!(platform.run_back_button_action());
        assert!(platform.is("iphone"));
    }

    #[test]
    fn reinit_drops_deferral_from_previous_chain() {
        let harness = Harness::new();
        let platform = harness.setup(registry(), signals(WECHAT_UA, ""));
        assert!(platform.is_ready_deferred());

        let chain = resolve(&registry(), &signals(IPHONE_UA, ""), "mobile");
        platform.initialize_chain(&chain);

        assert!(!platform.is_ready_deferred());
        assert_eq!(platform.platforms(), ["mobile", "ios", "iphone"]);
    }

    #[test]
    fn named_methods_replace_and_report_missing() {
        let harness = Harness::new();
        let platform = harness.setup(registry(), signals(IPHONE_UA, ""));
        let calls = Rc::new(RefCell::new(Vec::new()));
        let first = Rc::clone(&calls);
        let second = Rc::clone(&calls);

        platform.register_method("scanCode", move |arg| first.borrow_mut().push(("first", arg)));
        platform.register_method("scanCode", move |arg| second.borrow_mut().push(("second", arg)));
        platform.invoke("scanCode", json!({"needResult": 1}));
        platform.invoke("chooseImage", json!({}));

        assert_eq!(*calls.borrow(), [("second", json!({"needResult": 1}))]);
        assert_eq!(
            platform.try_invoke("chooseImage", Value::Null),
            Err(PlatformError::MethodNotRegistered {
                name: "chooseImage".to_string()
            })
        );
    }

    #[test]
    fn shell_events_reach_subscribers() {
        let harness = Harness::new();
        let platform = harness.setup(registry(), signals(IPHONE_UA, ""));
        let log = Rc::new(RefCell::new(Vec::new()));
        let paused = Rc::clone(&log);
        let resumed = Rc::clone(&log);
        let exited = Rc::clone(&log);
        platform.on_pause(move || paused.borrow_mut().push("pause"));
        platform.on_resume(move || resumed.borrow_mut().push("resume"));

        platform.exit_app();
        platform.register_method(EXIT_APP_METHOD, move |_| exited.borrow_mut().push("exit"));
        platform.pause();
        platform.resume();
        platform.exit_app();

        assert_eq!(*log.borrow(), ["pause", "resume", "exit"]);
    }

    #[test]
    fn config_accessors_expose_registry_and_css() {
        let harness = Harness::new();
        let platform = harness.setup(registry(), signals(IPHONE_UA, ""));

        assert!(platform.profile_config("wechat").is_some_and(|d| d.is_engine()));
        assert_eq!(platform.registry().len(), 4);
        assert_eq!(platform.user_agent(), IPHONE_UA);
        assert_eq!(platform.navigator_platform(), "iPhone");

        platform.set_css_props(CssProps::detect(|key| key == "transition"));
        assert_eq!(platform.css().transition.as_deref(), Some("transition"));
    }
}
