//! Named native-bridge method table.

use std::{cell::RefCell, collections::BTreeMap, rc::Rc};

use serde_json::Value;

use crate::PlatformError;

/// Capability installed under a stable name (`chooseImage`, `scanCode`, `share`, ...).
pub type NativeMethod = Rc<dyn Fn(Value)>;

/// Mutable name → method table shared by profiles and application code.
#[derive(Clone, Default)]
pub struct MethodRegistry {
    methods: Rc<RefCell<BTreeMap<String, NativeMethod>>>,
}

impl MethodRegistry {
    /// Installs `method` under `name` and returns the method it replaced.
    ///
    /// An empty name is ignored.
    pub fn register(&self, name: &str, method: NativeMethod) -> Option<NativeMethod> {
        if name.is_empty() {
            return None;
        }
        self.methods.borrow_mut().insert(name.to_string(), method)
    }

    /// Removes the method registered under `name`.
    pub fn unregister(&self, name: &str) -> Option<NativeMethod> {
        self.methods.borrow_mut().remove(name)
    }

    /// Returns whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.methods.borrow().contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<String> {
        self.methods.borrow().keys().cloned().collect()
    }

    /// Calls the method registered under `name` with `arg`.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::MethodNotRegistered`] when nothing is registered under `name`.
    pub fn invoke(&self, name: &str, arg: Value) -> Result<(), PlatformError> {
        // Clone out of the table so the method may re-register itself.
        let method = self
            .methods
            .borrow()
            .get(name)
            .cloned()
            .ok_or_else(|| PlatformError::MethodNotRegistered {
                name: name.to_string(),
            })?;
        method(arg);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn second_registration_replaces_first() {
        let registry = MethodRegistry::default();
        let calls = Rc::new(RefCell::new(Vec::new()));
        let first_calls = Rc::clone(&calls);
        let second_calls = Rc::clone(&calls);

        assert!(registry
            .register("share", Rc::new(move |_: Value| first_calls.borrow_mut().push("first")))
            .is_none());
        assert!(registry
            .register("share", Rc::new(move |_: Value| second_calls.borrow_mut().push("second")))
            .is_some());
        registry.invoke("share", Value::Null).expect("invoke");

        assert_eq!(*calls.borrow(), ["second"]);
    }

    #[test]
    fn unregistered_invoke_is_an_error_without_side_effects() {
        let registry = MethodRegistry::default();
        assert_eq!(
            registry.invoke("scanCode", json!({})),
            Err(PlatformError::MethodNotRegistered {
                name: "scanCode".to_string()
            })
        );
    }

    #[test]
    fn empty_name_is_ignored() {
        let registry = MethodRegistry::default();
        registry.register("", Rc::new(|_: Value| {}));
        assert!(registry.names().is_empty());
    }

    #[test]
    fn argument_is_forwarded() {
        let registry = MethodRegistry::default();
        let seen = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&seen);
        registry.register("chooseImage", Rc::new(move |arg: Value| *sink.borrow_mut() = Some(arg)));

        registry
            .invoke("chooseImage", json!({"count": 1}))
            .expect("invoke");

        assert_eq!(*seen.borrow(), Some(json!({"count": 1})));
    }
}
