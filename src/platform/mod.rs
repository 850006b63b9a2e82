//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Canvas sizing
//! - Storage (LocalStorage on web)
//! - Haptics (navigator.vibrate on web)

use crate::consts::{CANVAS_HEIGHT_FRACTION, MAX_CANVAS_HEIGHT, MAX_CANVAS_WIDTH};

/// Side of the square play surface for a window of the given size
pub fn canvas_size(window_width: f64, window_height: f64) -> u32 {
    let max_width = window_width.min(MAX_CANVAS_WIDTH);
    let max_height = (window_height * CANVAS_HEIGHT_FRACTION).min(MAX_CANVAS_HEIGHT);
    max_width.min(max_height).max(1.0).floor() as u32
}

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// Read a LocalStorage value
#[cfg(target_arch = "wasm32")]
pub fn storage_get(key: &str) -> Option<String> {
    local_storage()?.get_item(key).ok()?
}

/// Write a LocalStorage value. Returns false when storage is unavailable.
#[cfg(target_arch = "wasm32")]
pub fn storage_set(key: &str, value: &str) -> bool {
    local_storage()
        .map(|storage| storage.set_item(key, value).is_ok())
        .unwrap_or(false)
}

/// Short vibration pulse; silently ignored where unsupported
#[cfg(target_arch = "wasm32")]
pub fn vibrate(duration_ms: u32) {
    if let Some(window) = web_sys::window() {
        let _ = window.navigator().vibrate_with_duration(duration_ms);
    }
}
