use alm_core::realtime::{BridgeInput, ConnectionId};
use futures_channel::mpsc::UnboundedSender;
use wasm_bindgen::prelude::*;
use web_sys::{js_sys, CloseEvent, Event, MessageEvent, WebSocket};

/// Owns the browser socket and its callbacks. Dropping it detaches the
/// callbacks and closes the socket, so a released connection can no longer
/// report anything.
pub struct SocketHandle {
    socket: WebSocket,
    _onopen: Closure<dyn FnMut(Event)>,
    _onmessage: Closure<dyn FnMut(MessageEvent)>,
    _onclose: Closure<dyn FnMut(CloseEvent)>,
    _onerror: Closure<dyn FnMut(Event)>,
}

impl Drop for SocketHandle {
    fn drop(&mut self) {
        self.socket.set_onopen(None);
        self.socket.set_onmessage(None);
        self.socket.set_onclose(None);
        self.socket.set_onerror(None);
        let _ = self.socket.close();
    }
}

pub fn open(
    conn: ConnectionId,
    url: &str,
    events: UnboundedSender<BridgeInput>,
) -> Option<SocketHandle> {
    let socket = match WebSocket::new(url) {
        Ok(socket) => socket,
        Err(e) => {
            crate::log_warn!("realtime {}: failed to create WebSocket: {:?}", conn, e);
            let _ = events.unbounded_send(BridgeInput::Errored(conn));
            return None;
        }
    };

    let tx = events.clone();
    let onopen = Closure::wrap(Box::new(move |_: Event| {
        let _ = tx.unbounded_send(BridgeInput::Opened(conn));
    }) as Box<dyn FnMut(Event)>);

    let tx = events.clone();
    let onmessage = Closure::wrap(Box::new(move |e: MessageEvent| {
        if let Ok(text) = e.data().dyn_into::<js_sys::JsString>() {
            let _ = tx.unbounded_send(BridgeInput::Message(conn, text.into()));
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    let tx = events.clone();
    let onclose = Closure::wrap(Box::new(move |e: CloseEvent| {
        crate::log_debug!("realtime {}: closed with code {}", conn, e.code());
        let _ = tx.unbounded_send(BridgeInput::Closed(conn));
    }) as Box<dyn FnMut(CloseEvent)>);

    let tx = events;
    let onerror = Closure::wrap(Box::new(move |_: Event| {
        let _ = tx.unbounded_send(BridgeInput::Errored(conn));
    }) as Box<dyn FnMut(Event)>);

    socket.set_onopen(Some(onopen.as_ref().unchecked_ref()));
    socket.set_onmessage(Some(onmessage.as_ref().unchecked_ref()));
    socket.set_onclose(Some(onclose.as_ref().unchecked_ref()));
    socket.set_onerror(Some(onerror.as_ref().unchecked_ref()));

    Some(SocketHandle {
        socket,
        _onopen: onopen,
        _onmessage: onmessage,
        _onclose: onclose,
        _onerror: onerror,
    })
}
