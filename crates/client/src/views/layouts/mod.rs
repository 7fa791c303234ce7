//! Layout components for the application.

mod app_shell;

pub use app_shell::AppShell;
