use log::warn;
use wasm_bindgen::JsValue;
use web_sys::{window, Document};

/// Best-effort readable text for a value thrown by a browser API.
pub fn js_error_message(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

pub fn document() -> Option<Document> {
    window().and_then(|w| w.document())
}

/// Blocking browser alert. Logs instead when there is no window.
pub fn alert(message: &str) {
    match window() {
        Some(window) => {
            if let Err(e) = window.alert_with_message(message) {
                warn!("Failed to show alert: {}", js_error_message(&e));
            }
        }
        None => warn!("No window to show alert: {}", message),
    }
}

