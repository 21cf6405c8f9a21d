use std::time::Duration;

use panel_logging::{panel_error, panel_info};
use serde_json::json;

use crate::send::map_reqwest_error;
use crate::{FailureKind, SendError};

/// Posts plain-text reports to a Slack incoming webhook.
#[derive(Debug, Clone)]
pub struct SlackNotifier {
    webhook: reqwest::Url,
    client: reqwest::Client,
}

impl SlackNotifier {
    pub fn new(webhook_url: &str, request_timeout: Duration) -> Result<Self, SendError> {
        let webhook = reqwest::Url::parse(webhook_url)
            .map_err(|err| SendError::new(FailureKind::InvalidEndpoint, err.to_string()))?;
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|err| SendError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { webhook, client })
    }

    /// Sends `message` as a code block. The webhook must answer 200.
    pub async fn post(&self, message: &str) -> Result<(), SendError> {
        let payload = json!({ "text": code_block(message) });
        let response = self
            .client
            .post(self.webhook.clone())
            .json(&payload)
            .send()
            .await
            .map_err(|err| {
                let err = map_reqwest_error(err);
                panel_error!("Error sending Slack notification: {}", err);
                err
            })?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            panel_error!(
                "Failed to send Slack message, status code: {}",
                status.as_u16()
            );
            return Err(SendError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }
        panel_info!("Slack message sent successfully");
        Ok(())
    }

    /// [`SlackNotifier::post`] for callers without an async runtime.
    pub fn post_blocking(&self, message: &str) -> Result<(), SendError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|err| SendError::new(FailureKind::Network, err.to_string()))?;
        runtime.block_on(self.post(message))
    }
}

/// The message is embedded JSON-encoded inside a fenced block.
fn code_block(message: &str) -> String {
    let encoded = serde_json::to_string(message).unwrap_or_else(|_| message.to_string());
    format!("```\n{encoded}\n```")
}

#[cfg(test)]
mod tests {
    use super::code_block;

    #[test]
    fn code_block_escapes_newlines() {
        assert_eq!(code_block("a\nb"), "```\n\"a\\nb\"\n```");
    }
}
