//! Core broadcast engine: the message type, per-subscriber mailboxes, and
//! the hub event loop that owns the live-subscriber registry.

pub mod error;
pub mod hub;
pub mod message;
pub mod subscriber;

pub use error::FanError;
pub use hub::{Hub, HubHandle};
pub use message::Message;
pub use subscriber::{Subscriber, SubscriberId};
