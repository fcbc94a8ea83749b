//! Browser event wiring for the platform facade.
//!
//! Listeners registered here live for the rest of the page; their closures are leaked with
//! `forget`.

use std::{cell::RefCell, rc::Rc};

use platform_profile::Platform;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast};

#[cfg(target_arch = "wasm32")]
fn listen(target: &web_sys::EventTarget, event: &str, handler: impl FnMut() + 'static) {
    let mut handler = handler;
    let closure = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |_| handler()));
    if let Err(err) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
    {
        tracing::warn!("add_event_listener `{event}` failed: {err:?}");
    }
    closure.forget();
}

/// Routes `window` resize events into [`Platform::window_resize`].
pub fn listen_window_resize(platform: &Platform) {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(window) = web_sys::window() else {
            return;
        };
        let platform = platform.clone();
        listen(window.as_ref(), "resize", move || platform.window_resize());
    }

    #[cfg(not(target_arch = "wasm32"))]
    let _ = platform;
}

/// Routes shell `backbutton`, `pause`, and `resume` document events into the facade.
///
/// Hybrid shells (Cordova and similar) dispatch these on `document`; engine profiles call
/// this from their `initialize` hook.
pub fn listen_shell_events(platform: &Platform) {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(document) = web_sys::window().and_then(|window| window.document()) else {
            return;
        };
        let back = platform.clone();
        listen(document.as_ref(), "backbutton", move || back.back_button());
        let pause = platform.clone();
        listen(document.as_ref(), "pause", move || pause.pause());
        let resume = platform.clone();
        listen(document.as_ref(), "resume", move || resume.resume());
    }

    #[cfg(not(target_arch = "wasm32"))]
    let _ = platform;
}

/// Runs `callback` once the document has been parsed.
///
/// Runs immediately when parsing already finished (and always outside a browser); otherwise
/// on whichever of `DOMContentLoaded` or `load` fires first.
pub fn on_dom_ready(callback: impl FnOnce() + 'static) {
    let slot: Rc<RefCell<Option<Box<dyn FnOnce()>>>> =
        Rc::new(RefCell::new(Some(Box::new(callback))));
    let fire = move || {
        let callback = slot.borrow_mut().take();
        if let Some(callback) = callback {
            callback();
        }
    };

    if crate::document_is_ready() {
        fire();
        return;
    }

    #[cfg(target_arch = "wasm32")]
    {
        let Some(window) = web_sys::window() else {
            fire();
            return;
        };
        let fire = Rc::new(fire);
        if let Some(document) = window.document() {
            let on_parsed = Rc::clone(&fire);
            listen(document.as_ref(), "DOMContentLoaded", move || on_parsed());
        }
        listen(window.as_ref(), "load", move || fire());
    }
}
