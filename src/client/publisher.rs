use anyhow::{bail, Context};
use bytes::Bytes;
use reqwest::StatusCode;

/// HTTP client that publishes messages to a broker.
pub struct Publisher {
    endpoint: String,
    http: reqwest::Client,
}

impl Publisher {
    pub fn new(addr: &str) -> Self {
        Self {
            endpoint: format!("http://{addr}/publish"),
            http: reqwest::Client::new(),
        }
    }

    /// Publishes one message. Success means the broker accepted the message,
    /// not that any subscriber received it.
    pub async fn publish(&self, payload: impl Into<Bytes>) -> anyhow::Result<()> {
        let response = self
            .http
            .post(&self.endpoint)
            .body(payload.into())
            .send()
            .await
            .with_context(|| format!("failed to reach {}", self.endpoint))?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            bail!(
                "publish rejected by {}: {} {}",
                self.endpoint,
                status,
                body.trim()
            );
        }

        Ok(())
    }
}
