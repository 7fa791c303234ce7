//! ALM client - Dioxus web and desktop front-end
//!
//! Screens for organizations, projects and the artifact board, a single
//! global modal slot, a query cache refreshed by mutations and by the
//! realtime bridge, and toast notifications. The UI-independent state
//! machines live in `alm-core`.

#![allow(non_snake_case)]

#[macro_use]
pub mod logging;

pub mod api_client;
pub mod auth_session;
pub mod config;
pub mod platform;
pub mod storage;

pub mod components;
pub mod hooks;
pub mod modals;
pub mod realtime;
pub mod routes;
pub mod stores;
pub mod views;

pub use api_client::ApiClient;
pub use auth_session::{AuthContext, AuthProvider, AuthSession};
pub use routes::Route;
