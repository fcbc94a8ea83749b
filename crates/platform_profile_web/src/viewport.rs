//! `window`/`screen` viewport source.

use platform_profile::{ViewportSample, ViewportSource};

#[derive(Debug, Clone, Copy, Default)]
/// Viewport source reading `window.inner*` and `screen.*`.
pub struct WindowViewport;

impl WindowViewport {
    /// Reads the current viewport, or `None` outside a browser.
    pub fn read(self) -> Option<ViewportSample> {
        #[cfg(target_arch = "wasm32")]
        {
            let window = web_sys::window()?;
            let dimension = |value: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
                value
                    .ok()
                    .and_then(|value| value.as_f64())
                    .map(|value| value.max(0.0) as u32)
                    .unwrap_or(0)
            };
            let screen = window.screen().ok()?;
            Some(ViewportSample {
                inner_width: dimension(window.inner_width()),
                inner_height: dimension(window.inner_height()),
                screen_width: screen.width().map(|w| w.max(0) as u32).unwrap_or(0),
                screen_height: screen.height().map(|h| h.max(0) as u32).unwrap_or(0),
            })
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            None
        }
    }
}

impl ViewportSource for WindowViewport {
    fn sample(&self) -> Option<ViewportSample> {
        self.read()
    }
}
