//! Root-document adapters: attribute reflection, CSS probing, and load state.

use platform_profile::{CssProps, DocumentAttributes};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{JsCast, JsValue};

#[derive(Debug, Clone, Copy, Default)]
/// Writes attributes onto `document.documentElement`.
pub struct WebDocumentAttributes;

impl DocumentAttributes for WebDocumentAttributes {
    fn set_document_attribute(&self, name: &str, value: &str) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            let element = web_sys::window()
                .and_then(|window| window.document())
                .and_then(|document| document.document_element())
                .ok_or_else(|| "document element unavailable".to_string())?;
            element
                .set_attribute(name, value)
                .map_err(|err| format!("set_attribute `{name}` failed: {err:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (name, value);
            Ok(())
        }
    }
}

/// Probes `document.documentElement.style` for vendor-prefixed property support.
///
/// Outside a browser nothing is supported and plain names are derived.
pub fn probe_css_props() -> CssProps {
    #[cfg(target_arch = "wasm32")]
    {
        let style = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.document_element())
            .and_then(|element| element.dyn_into::<web_sys::HtmlElement>().ok())
            .map(|element| element.style());
        CssProps::detect(|key| {
            style.as_ref().is_some_and(|style| {
                js_sys::Reflect::get(style.as_ref(), &JsValue::from_str(key))
                    .map(|value| !value.is_undefined())
                    .unwrap_or(false)
            })
        })
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        CssProps::detect(|_| false)
    }
}

/// Returns whether the document finished parsing (`interactive` or `complete`).
///
/// Outside a browser there is no document to wait for, so this is always `true`.
pub fn document_is_ready() -> bool {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()
            .and_then(|window| window.document())
            .map(|document| document.ready_state() != web_sys::DocumentReadyState::Loading)
            .unwrap_or(true)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        true
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn document_adapters_public_api_non_wasm_parity() {
        assert_eq!(
            WebDocumentAttributes.set_document_attribute("dir", "rtl"),
            Ok(())
        );
        assert!(document_is_ready());

        let css = probe_css_props();
        assert_eq!(css.transform, None);
        assert_eq!(css.transition_end, "transitionend");
    }
}
