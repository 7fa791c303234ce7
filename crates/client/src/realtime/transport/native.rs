use alm_core::realtime::{BridgeInput, ConnectionId};
use futures_channel::mpsc::UnboundedSender;
use futures_channel::oneshot;
use futures_util::StreamExt;
use tokio_tungstenite::{connect_async, tungstenite::Message};

/// Closes the socket when dropped.
pub struct SocketHandle {
    _close: oneshot::Sender<()>,
}

pub fn open(
    conn: ConnectionId,
    url: &str,
    events: UnboundedSender<BridgeInput>,
) -> Option<SocketHandle> {
    let (close_tx, mut close_rx) = oneshot::channel::<()>();
    let url = url.to_string();

    tokio::spawn(async move {
        let connected = tokio::select! {
            _ = &mut close_rx => return,
            result = connect_async(url.as_str()) => result,
        };
        let mut socket = match connected {
            Ok((socket, _)) => socket,
            Err(e) => {
                tracing::warn!(%conn, "realtime connect failed: {e}");
                let _ = events.unbounded_send(BridgeInput::Errored(conn));
                return;
            }
        };
        let _ = events.unbounded_send(BridgeInput::Opened(conn));

        loop {
            tokio::select! {
                _ = &mut close_rx => {
                    let _ = socket.close(None).await;
                    return;
                }
                frame = socket.next() => match frame {
                    Some(Ok(Message::Text(text))) => {
                        let _ = events.unbounded_send(BridgeInput::Message(conn, text.as_str().to_owned()));
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        let _ = events.unbounded_send(BridgeInput::Closed(conn));
                        return;
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::warn!(%conn, "realtime socket error: {e}");
                        let _ = events.unbounded_send(BridgeInput::Errored(conn));
                        return;
                    }
                }
            }
        }
    });

    Some(SocketHandle { _close: close_tx })
}
