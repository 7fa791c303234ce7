//! Persistent key/value storage for the auth session and user settings.
//!
//! Values are stored as JSON: in `localStorage` on the web, and as one file
//! per key under the platform config directory (`~/.config/alm-client/` on
//! Linux) on desktop.

use serde::{de::DeserializeOwned, Serialize};

/// Bearer token and signed-in user.
pub const SESSION_KEY: &str = "alm_session";
/// API base chosen on the login screen.
pub const API_BASE_KEY: &str = "alm_api_base";

/// Returns `true` if the value was written.
pub fn save<T: Serialize>(key: &str, value: &T) -> bool {
    match serde_json::to_string(value) {
        Ok(json) => backend::write(key, &json),
        Err(e) => {
            crate::log_warn!("storage: could not encode '{}': {}", key, e);
            false
        }
    }
}

/// `None` when the key is missing or no longer decodes (e.g. after a format
/// change); stale values are then simply replaced on the next save.
pub fn load<T: DeserializeOwned>(key: &str) -> Option<T> {
    let json = backend::read(key)?;
    match serde_json::from_str(&json) {
        Ok(value) => Some(value),
        Err(e) => {
            crate::log_warn!("storage: discarding unreadable '{}': {}", key, e);
            None
        }
    }
}

pub fn remove(key: &str) {
    backend::delete(key);
}

#[cfg(target_arch = "wasm32")]
mod backend {
    fn local_storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    pub fn write(key: &str, value: &str) -> bool {
        local_storage().is_some_and(|s| s.set_item(key, value).is_ok())
    }

    pub fn read(key: &str) -> Option<String> {
        local_storage()?.get_item(key).ok()?
    }

    pub fn delete(key: &str) {
        if let Some(storage) = local_storage() {
            let _ = storage.remove_item(key);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod backend {
    use std::path::PathBuf;

    fn path_for(key: &str) -> Option<PathBuf> {
        let dir = dirs::config_dir()?.join("alm-client");
        std::fs::create_dir_all(&dir).ok()?;
        Some(dir.join(format!("{}.json", super::file_stem(key))))
    }

    pub fn write(key: &str, value: &str) -> bool {
        path_for(key).is_some_and(|path| std::fs::write(path, value).is_ok())
    }

    pub fn read(key: &str) -> Option<String> {
        std::fs::read_to_string(path_for(key)?).ok()
    }

    pub fn delete(key: &str) {
        if let Some(path) = path_for(key) {
            let _ = std::fs::remove_file(path);
        }
    }
}

/// Key made safe to use as a file name.
#[cfg_attr(target_arch = "wasm32", allow(dead_code))]
fn file_stem(key: &str) -> String {
    key.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_stem_replaces_path_characters() {
        assert_eq!(file_stem("alm_session"), "alm_session");
        assert_eq!(file_stem("a/b:c*d"), "a_b_c_d");
    }
}
