//! HTTP/WebSocket front end for the broker.
//!
//! - `server`: axum router and handlers wiring subscribe ingress and publish
//!   ingest to the hub.

pub mod server;

pub use self::server::{router, serve};
