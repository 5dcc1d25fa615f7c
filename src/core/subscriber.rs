use std::fmt;
use std::net::SocketAddr;

use tokio::sync::mpsc::{self, error::TrySendError, Receiver, Sender};
use uuid::Uuid;

use crate::core::error::FanError;
use crate::core::message::Message;

/// Unique identifier for a subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(Uuid);

impl SubscriberId {
    fn new() -> Self {
        SubscriberId(Uuid::new_v4())
    }
}

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Receiving half of a mailbox. Owned exclusively by that subscriber's
/// writer task; the hub only ever holds the sending half.
pub type Mailbox = Receiver<Message>;

/// The hub-facing half of one live connection: identity plus the sending
/// side of that connection's bounded mailbox.
#[derive(Debug, Clone)]
pub struct Subscriber {
    id: SubscriberId,
    peer_addr: SocketAddr,
    mailbox: Sender<Message>,
}

impl Subscriber {
    /// Creates a subscriber with a fresh bounded mailbox, returning the
    /// receiving half for the writer loop.
    pub fn new(peer_addr: SocketAddr, capacity: usize) -> (Self, Mailbox) {
        let (tx, rx) = mpsc::channel(capacity);
        (
            Self {
                id: SubscriberId::new(),
                peer_addr,
                mailbox: tx,
            },
            rx,
        )
    }

    pub fn id(&self) -> SubscriberId {
        self.id
    }

    pub fn peer_addr(&self) -> SocketAddr {
        self.peer_addr
    }

    /// Non-blocking enqueue, called only by the hub during fan-out.
    pub fn enqueue(&self, message: Message) -> Result<(), FanError> {
        self.mailbox.try_send(message).map_err(|e| match e {
            TrySendError::Full(_) => FanError::MailboxFull,
            TrySendError::Closed(_) => FanError::MailboxClosed,
        })
    }
}
