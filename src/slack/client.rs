// Outbound delivery to a Slack incoming webhook.
//
// `Notifier` is the seam between the bridge and the network: the server
// uses `SlackClient`, tests substitute a recorder. One POST per message,
// no retries. The only timeout is whatever reqwest applies by default.

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::debug;

use super::message::SlackMessage;

/// Why an outbound delivery didn't complete.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The request never got a response (DNS, connect, TLS, reset, ...).
    #[error("Slack webhook request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Slack answered with a non-success status.
    #[error("Slack webhook returned {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Something that can deliver a composed Slack message.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn deliver(&self, message: &SlackMessage) -> Result<(), DispatchError>;
}

/// Posts messages to a fixed incoming-webhook URL.
pub struct SlackClient {
    client: Client,
    url: String,
}

impl SlackClient {
    /// Create a client posting to `url`.
    pub fn new(url: &str) -> Result<Self, DispatchError> {
        let client = Client::builder()
            .user_agent(concat!("plexhook/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            url: url.to_string(),
        })
    }
}

#[async_trait]
impl Notifier for SlackClient {
    async fn deliver(&self, message: &SlackMessage) -> Result<(), DispatchError> {
        // .json() sets Content-Type: application/json
        let response = self.client.post(&self.url).json(message).send().await?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        debug!(status = %status, body = %body, "Slack webhook responded");

        if !status.is_success() {
            return Err(DispatchError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}
