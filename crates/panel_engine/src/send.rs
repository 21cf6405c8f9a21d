use std::time::Duration;

use panel_core::EmailRequest;
use panel_logging::{panel_debug, panel_warn};

use crate::{FailureKind, SendError};

pub const SEND_EMAIL_PATH: &str = "/send-email";

#[derive(Debug, Clone)]
pub struct SendSettings {
    /// Base URL of the backend, e.g. `http://127.0.0.1:5000`.
    pub endpoint: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for SendSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:5000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[async_trait::async_trait]
pub trait EmailSender: Send + Sync {
    /// Delivers one `/send-email` request. Any 2xx answer is success.
    async fn send(&self, request: &EmailRequest) -> Result<(), SendError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestEmailSender {
    url: reqwest::Url,
    client: reqwest::Client,
}

impl ReqwestEmailSender {
    pub fn new(settings: &SendSettings) -> Result<Self, SendError> {
        let url = send_email_url(&settings.endpoint)?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| SendError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { url, client })
    }

    pub fn url(&self) -> &reqwest::Url {
        &self.url
    }
}

fn send_email_url(endpoint: &str) -> Result<reqwest::Url, SendError> {
    let joined = format!("{}{}", endpoint.trim_end_matches('/'), SEND_EMAIL_PATH);
    reqwest::Url::parse(&joined)
        .map_err(|err| SendError::new(FailureKind::InvalidEndpoint, err.to_string()))
}

#[async_trait::async_trait]
impl EmailSender for ReqwestEmailSender {
    async fn send(&self, request: &EmailRequest) -> Result<(), SendError> {
        panel_debug!(
            "POST {} check={} recipients={}",
            self.url,
            request.check,
            request.email.len()
        );
        let response = self
            .client
            .post(self.url.clone())
            .json(request)
            .send()
            .await
            .map_err(|err| {
                let err = map_reqwest_error(err);
                panel_warn!("send-email request failed: {}", err);
                err
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SendError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }
        Ok(())
    }
}

pub(crate) fn map_reqwest_error(err: reqwest::Error) -> SendError {
    if err.is_timeout() {
        return SendError::new(FailureKind::Timeout, err.to_string());
    }
    SendError::new(FailureKind::Network, err.to_string())
}
