//! Realtime driver for the web and desktop builds.
//!
//! [`RealtimeProvider`] owns an [`alm_core::realtime::RealtimeBridge`] inside
//! a coroutine. Session changes from the auth context and events from the
//! socket and timers are fed to the bridge one at a time; the commands it
//! returns are executed against the platform transport in [`transport`].
//! Invalidations land in the global query cache, notifications in the
//! toast queue.

mod provider;
mod transport;

pub use provider::RealtimeProvider;
