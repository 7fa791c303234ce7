//! Realtime cache-invalidation bridge.
//!
//! [`RealtimeBridge`] is a sans-IO state machine: it consumes
//! [`BridgeInput`]s (session changes, transport events, timer expiries),
//! applies cache invalidations and notifications directly, and returns the
//! [`IoCommand`]s (connect, disconnect, arm/cancel timer) for a driver to
//! execute against a real socket and clock.
//!
//! ```text
//!            SessionChanged(authenticated)
//!   Idle ────────────────────────────────► Connecting ──Opened──► Open
//!    ▲                                        ▲                    │
//!    │ logout / shutdown                      │ ReconnectDue       │ Closed / Errored
//!    │ (cancel timer, close socket)           │                    ▼
//!    └──────────────────────────────────── Reconnecting ◄──────────┘
//! ```

mod backoff;
mod bridge;

pub use backoff::Backoff;
pub use bridge::{
    state_change_message, BridgeInput, ConnectionId, ConnectionState, IoCommand, RealtimeBridge,
    SessionSnapshot, TimerId,
};
