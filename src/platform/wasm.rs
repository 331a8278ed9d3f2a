use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

/// `navigator.clipboard.writeText`, looked up dynamically because older
/// WebViews don't expose it. Returns `false` when there is no clipboard.
pub fn copy_to_clipboard(s: &str) -> bool {
    let Some(promise) = write_text(s) else { return false; };
    wasm_bindgen_futures::spawn_local(async move {
        if let Err(e) = JsFuture::from(promise).await {
            log::warn!("[clipboard] write rejected: {e:?}");
        }
    });
    true
}

fn write_text(s: &str) -> Option<js_sys::Promise> {
    let nav = web_sys::window()?.navigator();
    let clip = js_sys::Reflect::get(&nav, &JsValue::from_str("clipboard")).ok()?;
    if clip.is_undefined() || clip.is_null() {
        return None;
    }
    let write = js_sys::Reflect::get(&clip, &JsValue::from_str("writeText"))
        .ok()?
        .dyn_into::<js_sys::Function>()
        .ok()?;
    write
        .call1(&clip, &JsValue::from_str(s))
        .ok()?
        .dyn_into::<js_sys::Promise>()
        .ok()
}
