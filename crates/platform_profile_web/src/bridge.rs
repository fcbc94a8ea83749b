//! Adapts JavaScript bridge functions into named platform methods.

use platform_profile::Platform;
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::JsValue;

/// Converts a JSON argument into a plain JS value (objects become plain objects, not `Map`s).
///
/// # Errors
///
/// Returns an error when the value cannot be represented in JS.
pub fn json_to_js(value: &Value) -> Result<JsValue, String> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|err| format!("argument conversion failed: {err}"))
}

/// Wraps a JS function so it can be registered with [`Platform::register_method`].
///
/// Conversion or call failures are logged; the JS return value is ignored.
pub fn native_method_from_js(name: &str, function: js_sys::Function) -> impl Fn(Value) + 'static {
    let name = name.to_string();
    move |arg: Value| {
        let result = json_to_js(&arg).and_then(|arg| {
            function
                .call1(&JsValue::NULL, &arg)
                .map(|_| ())
                .map_err(|err| format!("call failed: {err:?}"))
        });
        if let Err(err) = result {
            tracing::warn!("bridge method `{name}`: {err}");
        }
    }
}

/// Registers a JS function as the platform method `name`.
pub fn register_js_method(platform: &Platform, name: &str, function: js_sys::Function) {
    platform.register_method(name, native_method_from_js(name, function));
}
