//! Clipboard sink for the copy action.

use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;

/// Write plain text via the async Clipboard API.
pub async fn write_text(text: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let clipboard = window.navigator().clipboard();
    JsFuture::from(clipboard.write_text(text)).await?;
    tracing::debug!(target: "canvas::session", bytes = text.len(), "copied to clipboard");
    Ok(())
}

/// Fire-and-forget variant for event handlers.
pub fn spawn_write_text(text: String) {
    wasm_bindgen_futures::spawn_local(async move {
        if let Err(e) = write_text(&text).await {
            tracing::warn!("Clipboard write failed: {:?}", e);
        }
    });
}
