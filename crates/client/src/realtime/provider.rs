use std::collections::HashMap;

use alm_core::realtime::{BridgeInput, ConnectionId, IoCommand, RealtimeBridge, TimerId};
use dioxus::prelude::*;
use futures_channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender};
use futures_util::{stream, StreamExt};

use super::transport::{self, SocketHandle};
use crate::auth_session::AuthContext;
use crate::config::client_config;
use crate::platform::TaskHandle;
use crate::stores::{GlobalNotifier, GlobalQueryCache};

/// Keeps the realtime connection in step with the auth session for as long
/// as it is mounted. Unmounting closes the socket and cancels any pending
/// reconnect.
#[component]
pub fn RealtimeProvider(children: Element) -> Element {
    let auth = use_context::<AuthContext>();
    let driver = use_coroutine(|inputs: UnboundedReceiver<BridgeInput>| drive(inputs));

    use_effect(move || {
        driver.send(BridgeInput::SessionChanged(auth.snapshot()));
    });

    children
}

async fn drive(inputs: UnboundedReceiver<BridgeInput>) {
    let (events_tx, events_rx) = unbounded();
    let mut bridge = RealtimeBridge::new(client_config().realtime.clone());
    let mut io = LiveIo::new(events_tx);
    let mut merged = stream::select(inputs, events_rx);

    while let Some(input) = merged.next().await {
        if let BridgeInput::ReconnectDue(timer) = &input {
            io.timers.remove(timer);
        }
        let before = bridge.state();
        for command in bridge.handle(input, &GlobalQueryCache, &GlobalNotifier) {
            io.execute(command);
        }
        if bridge.state() != before {
            crate::log_debug!("realtime: {:?} -> {:?}", before, bridge.state());
        }
    }
}

/// Sockets and timers the bridge currently owns. Dropping it releases all
/// of them, which is what happens when the provider unmounts.
struct LiveIo {
    events: UnboundedSender<BridgeInput>,
    sockets: HashMap<ConnectionId, SocketHandle>,
    timers: HashMap<TimerId, TaskHandle>,
}

impl LiveIo {
    fn new(events: UnboundedSender<BridgeInput>) -> Self {
        Self {
            events,
            sockets: HashMap::new(),
            timers: HashMap::new(),
        }
    }

    fn execute(&mut self, command: IoCommand) {
        match command {
            IoCommand::Connect { conn, url } => {
                if let Some(socket) = transport::open(conn, &url, self.events.clone()) {
                    self.sockets.insert(conn, socket);
                }
            }
            IoCommand::Disconnect { conn } => {
                self.sockets.remove(&conn);
            }
            IoCommand::ScheduleReconnect { timer, delay } => {
                let task = transport::schedule(timer, delay, self.events.clone());
                self.timers.insert(timer, task);
            }
            IoCommand::CancelReconnect { timer } => {
                self.timers.remove(&timer);
            }
        }
    }
}

impl Drop for LiveIo {
    fn drop(&mut self) {
        if !self.sockets.is_empty() || !self.timers.is_empty() {
            crate::log_info!("realtime: releasing connection on unmount");
        }
        self.timers.clear();
        self.sockets.clear();
    }
}
