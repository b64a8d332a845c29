use dioxus::prelude::{Signal, WritableExt};
use shared_types::Viewport;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use crate::interop::current_viewport_size;

/// Mirror the browser viewport into `viewport` and report every change to
/// `on_resize`, starting with the current size.
pub async fn track_viewport<F>(mut viewport: Signal<Viewport>, on_resize: F)
where
    F: Fn(Viewport) + 'static,
{
    if let Some(size) = current_viewport_size() {
        viewport.set(size);
        on_resize(size);
    }

    let Some(window) = web_sys::window() else {
        return;
    };

    let callback = Closure::wrap(Box::new(move |_event: web_sys::Event| {
        if let Some(size) = current_viewport_size() {
            viewport.set(size);
            on_resize(size);
        }
    }) as Box<dyn FnMut(web_sys::Event)>);

    let _ = window.add_event_listener_with_callback("resize", callback.as_ref().unchecked_ref());
    let _ = window
        .add_event_listener_with_callback("orientationchange", callback.as_ref().unchecked_ref());

    // Keep listener alive for app lifetime.
    callback.forget();
}
