use serde::Deserialize;
use std::{fs, path::Path};

/// Default listen address. The broker serves both endpoints on one socket,
/// so this is the whole network surface.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

const DEFAULT_MAX_MESSAGE_SIZE_BYTES: usize = 1024 * 1024;
const DEFAULT_MAILBOX_CAPACITY: usize = 10;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// Publish bodies above this size are rejected before reaching the hub.
    #[serde(default = "default_max_message_size_bytes")]
    pub max_message_size_bytes: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DeliveryConfig {
    /// Bounded mailbox depth per subscriber. Overflow is dropped for that
    /// subscriber only; the hub never waits on a full mailbox.
    #[serde(default = "default_mailbox_capacity")]
    pub mailbox_capacity: usize,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub delivery: DeliveryConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            max_message_size_bytes: default_max_message_size_bytes(),
        }
    }
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            mailbox_capacity: default_mailbox_capacity(),
        }
    }
}

fn default_bind_addr() -> String {
    DEFAULT_BIND_ADDR.to_string()
}

fn default_max_message_size_bytes() -> usize {
    DEFAULT_MAX_MESSAGE_SIZE_BYTES
}

fn default_mailbox_capacity() -> usize {
    DEFAULT_MAILBOX_CAPACITY
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, anyhow::Error> {
    let raw: String = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&raw)?;
    Ok(config)
}
