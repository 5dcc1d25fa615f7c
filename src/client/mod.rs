//! Clients for a running broker.
//!
//! - `subscriber`: WebSocket subscription that yields broadcast payloads.
//! - `publisher`: HTTP client that publishes messages.
//!
//! Both are used by `fanmq-cli` and by the integration tests.

pub mod publisher;
pub mod subscriber;

pub use publisher::Publisher;
pub use subscriber::Subscription;
