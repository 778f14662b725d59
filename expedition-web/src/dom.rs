//! Thin helpers over the browser globals.

use js_sys::Promise;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Window};

/// The global `window`, when running inside a browser.
#[must_use]
pub fn window() -> Option<Window> {
    web_sys::window()
}

#[must_use]
pub fn document() -> Option<Document> {
    window().and_then(|w| w.document())
}

/// Best-effort text for a thrown JS value.
#[must_use]
pub fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| err.message().into())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

pub fn console_error(message: &str) {
    web_sys::console::error_1(&JsValue::from(message));
}

/// Resolve after `duration_ms` milliseconds.
///
/// # Errors
/// Returns an error when there is no `window` or the timer cannot be scheduled.
#[allow(clippy::future_not_send)]
pub async fn sleep_ms(duration_ms: i32) -> Result<(), JsValue> {
    let window = window().ok_or_else(|| JsValue::from_str("no window to schedule a timer on"))?;
    let mut scheduled = Ok(0);
    let promise = Promise::new(&mut |resolve, _reject| {
        scheduled =
            window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, duration_ms);
    });
    scheduled?;
    JsFuture::from(promise).await?;
    Ok(())
}

/// Seed for a new expedition, mixed from the clock and `Math.random`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn entropy_seed() -> u64 {
    let now = js_sys::Date::now().to_bits();
    let noise = (js_sys::Math::random() * f64::from(u32::MAX)) as u64;
    now.rotate_left(17) ^ noise
}
