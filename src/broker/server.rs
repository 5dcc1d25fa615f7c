//! axum front end: WebSocket subscribe ingress and HTTP publish ingest.
//!
//! All per-connection failures stay on this side of the hub. A failed
//! handshake or an unreadable publish body never becomes a hub event, and a
//! broken subscriber connection is translated into exactly one unsubscribe.

use std::net::SocketAddr;

use axum::{
    body::Body,
    extract::{
        ws::{Message as WsMessage, WebSocket},
        ConnectInfo, State, WebSocketUpgrade,
    },
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use bytes::Bytes;
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::core::hub::{Hub, HubHandle};
use crate::core::message::new_message;
use crate::core::subscriber::{Mailbox, Subscriber, SubscriberId};

/// Shared state for the HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    hub: HubHandle,
    mailbox_capacity: usize,
    max_message_size: usize,
}

/// Builds the broker router and spawns the hub event loop behind it.
///
/// The hub task exits on its own once the router (and every clone of its
/// state) has been dropped.
pub fn router(config: &Config) -> Router {
    let (hub, handle) = Hub::new();
    tokio::spawn(hub.run());

    let state = AppState {
        hub: handle,
        mailbox_capacity: config.delivery.mailbox_capacity,
        max_message_size: config.server.max_message_size_bytes,
    };

    Router::new()
        .route("/subscribe", get(subscribe_handler))
        .route("/publish", post(publish_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Binds the configured address and serves until the process exits.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let app = router(&config);
    let listener = TcpListener::bind(&config.server.bind_addr).await?;
    info!(addr = %config.server.bind_addr, "broker listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

async fn health_handler() -> &'static str {
    "ok"
}

/// GET /subscribe: upgrade to a WebSocket and relay broadcast messages to
/// this peer until it disconnects. A failed upgrade produces only an error
/// response; no subscriber is registered.
async fn subscribe_handler(
    ws: WebSocketUpgrade,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_subscriber(socket, peer, state))
}

async fn handle_subscriber(socket: WebSocket, peer: SocketAddr, state: AppState) {
    let (sink, stream) = socket.split();
    let (subscriber, mailbox) = Subscriber::new(peer, state.mailbox_capacity);
    let id = subscriber.id();

    state.hub.subscribe(subscriber).await;

    // Dedicated writer task drains the mailbox into the socket; the read
    // side only watches for the peer going away.
    let mut writer = tokio::spawn(write_loop(mailbox, sink, id));

    tokio::select! {
        _ = &mut writer => {}
        _ = read_until_closed(stream, id) => writer.abort(),
    }

    state.hub.unsubscribe(id).await;
    debug!(subscriber = %id, "subscriber connection closed");
}

/// Writes queued messages to the peer in mailbox order, one frame per
/// message. Terminates on the first transport failure; no retries.
async fn write_loop(
    mut mailbox: Mailbox,
    mut sink: SplitSink<WebSocket, WsMessage>,
    id: SubscriberId,
) {
    while let Some(message) = mailbox.recv().await {
        if let Err(e) = sink.send(frame_for(message.into_payload())).await {
            debug!(subscriber = %id, error = %e, "websocket write failed");
            break;
        }
    }
}

/// Inbound frames carry no meaning on the subscribe endpoint; reading only
/// detects an error or a client-initiated close.
async fn read_until_closed(mut stream: SplitStream<WebSocket>, id: SubscriberId) {
    while let Some(frame) = stream.next().await {
        match frame {
            Ok(WsMessage::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                debug!(subscriber = %id, error = %e, "websocket read failed");
                break;
            }
        }
    }
}

/// One payload becomes exactly one frame: text when it is valid UTF-8,
/// binary otherwise (the protocol rejects non-UTF-8 text frames, and bytes
/// are never mangled to force textness).
fn frame_for(payload: Bytes) -> WsMessage {
    match String::from_utf8(payload.to_vec()) {
        Ok(text) => WsMessage::Text(text.into()),
        Err(_) => WsMessage::Binary(payload),
    }
}

/// POST /publish: the raw request body becomes one broadcast message of
/// arbitrary content type. The 200 response means the hub accepted the
/// message, not that anyone received it.
async fn publish_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Body,
) -> StatusCode {
    if let Some(len) = declared_length(&headers) {
        if len > state.max_message_size {
            warn!(bytes = len, "publish body over size limit");
            return StatusCode::PAYLOAD_TOO_LARGE;
        }
    }

    let payload = match axum::body::to_bytes(body, state.max_message_size).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(error = %e, "failed to read publish body");
            return StatusCode::INTERNAL_SERVER_ERROR;
        }
    };

    state.hub.publish(new_message(payload)).await;
    StatusCode::OK
}

fn declared_length(headers: &HeaderMap) -> Option<usize> {
    headers
        .get(header::CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .parse()
        .ok()
}
