use anyhow::Context;
use bytes::Bytes;
use futures::StreamExt;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::protocol::Message as WsMessage;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::debug;

/// An open subscription to a broker.
///
/// Wraps the read side of the WebSocket; each received text or binary frame
/// is one broadcast payload.
pub struct Subscription {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl Subscription {
    /// Dials `ws://<addr>/subscribe` and completes the handshake.
    pub async fn connect(addr: &str) -> anyhow::Result<Self> {
        let url = format!("ws://{addr}/subscribe");
        let (stream, _response) = connect_async(url.as_str())
            .await
            .with_context(|| format!("failed to subscribe to {url}"))?;

        Ok(Self { stream })
    }

    /// Waits for the next broadcast payload.
    ///
    /// Returns `Ok(None)` once the connection is closed and an error on
    /// transport failure.
    pub async fn next_message(&mut self) -> anyhow::Result<Option<Bytes>> {
        while let Some(frame) = self.stream.next().await {
            match frame.context("websocket read failed")? {
                WsMessage::Text(text) => {
                    return Ok(Some(Bytes::from(text.as_bytes().to_vec())));
                }
                WsMessage::Binary(payload) => return Ok(Some(payload)),
                WsMessage::Close(_) => return Ok(None),
                other => debug!(frame = ?other, "ignoring control frame"),
            }
        }
        Ok(None)
    }
}
