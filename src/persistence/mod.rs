//! JSON save/load
//!
//! - Values are stored as JSON strings under a fixed key
//! - LocalStorage on web, no-op on native
//! - Corrupt entries are logged and treated as missing

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Serialize a value for storage
pub fn encode<T: Serialize>(value: &T) -> Option<String> {
    match serde_json::to_string(value) {
        Ok(json) => Some(json),
        Err(e) => {
            log::warn!("Failed to encode save data: {}", e);
            None
        }
    }
}

/// Parse stored JSON; `None` if it does not match `T`
pub fn decode<T: DeserializeOwned>(json: &str) -> Option<T> {
    match serde_json::from_str(json) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Ignoring corrupt save data: {}", e);
            None
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten()
}

/// Load a value from LocalStorage (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn load_json<T: DeserializeOwned>(key: &str) -> Option<T> {
    let json = local_storage()?.get_item(key).ok().flatten()?;
    decode(&json)
}

/// Save a value to LocalStorage (WASM only). Returns true on success.
#[cfg(target_arch = "wasm32")]
pub fn save_json<T: Serialize>(key: &str, value: &T) -> bool {
    let Some(storage) = local_storage() else {
        return false;
    };
    let Some(json) = encode(value) else {
        return false;
    };
    match storage.set_item(key, &json) {
        Ok(()) => true,
        Err(_) => {
            log::warn!("LocalStorage rejected write to '{}'", key);
            false
        }
    }
}

/// Native stubs
#[cfg(not(target_arch = "wasm32"))]
pub fn load_json<T: DeserializeOwned>(_key: &str) -> Option<T> {
    None
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save_json<T: Serialize>(_key: &str, _value: &T) -> bool {
    // No-op for native
    false
}
