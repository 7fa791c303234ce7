//! Process-wide client configuration.

use alm_core::ClientConfig;
use once_cell::sync::Lazy;

static CONFIG: Lazy<ClientConfig> = Lazy::new(|| {
    let config = load();
    crate::log_debug!(
        "client config: api_base={:?} ws_path={} backoff={:?}..{:?}",
        config.api_base,
        config.realtime.path,
        config.realtime.backoff.floor,
        config.realtime.backoff.ceiling
    );
    config
});

#[cfg(target_arch = "wasm32")]
fn load() -> ClientConfig {
    ClientConfig::default()
}

#[cfg(not(target_arch = "wasm32"))]
fn load() -> ClientConfig {
    ClientConfig::from_env()
}

pub fn client_config() -> &'static ClientConfig {
    &CONFIG
}

/// API base used when neither the environment nor the login screen chose
/// one: the page origin on the web, a local server on desktop.
pub fn fallback_api_base() -> String {
    if let Some(base) = &client_config().api_base {
        return base.clone();
    }
    page_origin().unwrap_or_else(|| "http://localhost:8080".to_string())
}

#[cfg(target_arch = "wasm32")]
fn page_origin() -> Option<String> {
    web_sys::window()?.location().origin().ok()
}

#[cfg(not(target_arch = "wasm32"))]
fn page_origin() -> Option<String> {
    None
}
