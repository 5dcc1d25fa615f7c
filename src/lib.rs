//! fanmq – a minimal fan-out message broker.
//!
//! Publishers POST opaque bytes to `/publish`; every client holding an open
//! WebSocket on `/subscribe` receives each accepted message as one frame.
//! Nothing is stored: delivery is transient and best-effort to whoever is
//! connected at broadcast time.
//!
//! This crate exports
//!  * `core`   – hub event loop, subscriber registry, per-subscriber mailboxes
//!  * `broker` – axum HTTP/WebSocket front end
//!  * `client` – subscriber and publisher clients used by the CLI
//!  * `config` – TOML-driven runtime configuration

// ───────────────────────────────────────────────────────────
// Public modules
// ───────────────────────────────────────────────────────────
pub mod broker;
pub mod client;
pub mod config;
pub mod core;
pub mod logging;

// ───────────────────────────────────────────────────────────
// Re-exports
// ───────────────────────────────────────────────────────────
pub use broker::serve as start_broker;
pub use config::{load_config, Config};
