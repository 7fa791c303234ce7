//! Platform sockets and reconnect timers. Every transport event is reported
//! back as a [`BridgeInput`] tagged with the id it was opened under.

use std::time::Duration;

use alm_core::realtime::{BridgeInput, TimerId};
use futures_channel::mpsc::UnboundedSender;

use crate::platform::{sleep, spawn_abortable, TaskHandle};

#[cfg(not(target_arch = "wasm32"))]
mod native;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(not(target_arch = "wasm32"))]
pub use native::{open, SocketHandle};
#[cfg(target_arch = "wasm32")]
pub use wasm::{open, SocketHandle};

/// Deliver `ReconnectDue(timer)` after `delay` unless the handle is dropped
/// first.
pub fn schedule(
    timer: TimerId,
    delay: Duration,
    events: UnboundedSender<BridgeInput>,
) -> TaskHandle {
    spawn_abortable(async move {
        sleep(delay).await;
        let _ = events.unbounded_send(BridgeInput::ReconnectDue(timer));
    })
}
