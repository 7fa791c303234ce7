//! Shared components.

pub mod toaster;
pub mod ui;

pub use toaster::Toaster;
