use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn is_debug_toggle_key(key: &str) -> bool {
    key == "z" || key == "Z"
}

// Wire a 'Z' key handler flipping the shared debug flag; the next frame
// picks it up and shows/hides the overlay.
pub fn wire_debug_toggle_z(debug_visible: Rc<Cell<bool>>) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                if is_debug_toggle_key(&ev.key()) {
                    debug_visible.set(!debug_visible.get());
                    ev.prevent_default();
                }
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
