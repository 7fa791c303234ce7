//! ALM client - main entry point
//!
//! Supports both web (WASM) and desktop platforms.

#![allow(non_snake_case)]

use alm_client::auth_session::AuthProvider;
use alm_client::components::Toaster;
use alm_client::realtime::RealtimeProvider;
use alm_client::routes::Route;
use dioxus::prelude::*;

const MAIN_CSS: Asset = asset!("/assets/styling/main.css");

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    {
        use tracing_subscriber::EnvFilter;
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("alm_client=debug,alm_core=info")),
            )
            .init();
    }

    // Build the modal registry up front so a bad registration fails at
    // startup instead of on first open.
    let registered = alm_client::modals::registry().iter().count();
    alm_client::log_debug!("{} modal kinds registered", registered);

    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        AuthProvider {
            RealtimeProvider {
                Router::<Route> {}
            }
            Toaster {}
        }
    }
}
