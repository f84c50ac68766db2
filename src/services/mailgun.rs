use crate::models::Notification;
use crate::services::Mailer;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when sending mail through Mailgun
#[derive(Debug, Error)]
pub enum MailError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    Api(reqwest::StatusCode),
}

/// Mailgun messages API client
pub struct MailgunClient {
    base_url: String,
    domain: String,
    api_key: String,
    from: String,
    client: Client,
}

impl MailgunClient {
    pub fn new(base_url: String, domain: String, api_key: String, from: String) -> Result<Self, MailError> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(Self {
            base_url,
            domain,
            api_key,
            from,
            client,
        })
    }

    fn messages_url(&self) -> String {
        format!("{}/v3/{}/messages", self.base_url.trim_end_matches('/'), self.domain)
    }
}

#[async_trait]
impl Mailer for MailgunClient {
    async fn send(&self, recipient: &str, notification: &Notification) -> Result<(), MailError> {
        tracing::info!("Send email '{}' to {}", notification.subject, recipient);

        let form = [
            ("from", self.from.as_str()),
            ("to", recipient),
            ("subject", notification.subject.as_str()),
            ("text", notification.body.as_str()),
        ];

        let response = self
            .client
            .post(self.messages_url())
            .basic_auth("api", Some(&self.api_key))
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        tracing::info!("Send email '{}' to {}. Response {}.", notification.subject, recipient, status);

        if !status.is_success() {
            return Err(MailError::Api(status));
        }

        Ok(())
    }
}
