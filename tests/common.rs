use std::net::SocketAddr;
use std::sync::Once;
use std::time::Duration;

use fanmq::broker::router;
use fanmq::core::message::Message;
use fanmq::core::subscriber::Mailbox;
use fanmq::Config;
use tokio::net::TcpListener;
use tokio::time::timeout;

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        fanmq::logging::init_logging();
    });
}

/// Serves a broker with `config` on an OS-assigned port and returns its
/// address.
#[allow(dead_code)]
pub async fn spawn_broker(config: Config) -> SocketAddr {
    let app = router(&config);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .unwrap();
    });

    addr
}

/// Placeholder peer address for hub-level tests that never open a socket.
#[allow(dead_code)]
pub fn peer_addr() -> SocketAddr {
    "127.0.0.1:4000".parse().unwrap()
}

/// Reads the next mailbox entry, returning `None` on close or timeout.
#[allow(dead_code)]
pub async fn recv_within(mailbox: &mut Mailbox, wait: Duration) -> Option<Message> {
    timeout(wait, mailbox.recv()).await.ok().flatten()
}
