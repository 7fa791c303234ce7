//! ALM client core
//!
//! State machines behind the ALM front-end that do not depend on a UI
//! runtime: the modal registry/store/API, the query cache bookkeeping, the
//! notification queue and the realtime reconnect bridge. The Dioxus crate
//! wraps these in global signals and drives them from components.

pub mod config;
pub mod handler;
pub mod modal;
pub mod notify;
pub mod query;
pub mod realtime;

pub use config::{BackoffPolicy, ClientConfig, RealtimeConfig};
pub use handler::Handler;
pub use notify::{Notification, NotificationQueue, Notifier, Severity};
pub use query::{QueryCache, QueryCacheState, QueryKey, QueryKeyMatcher};
