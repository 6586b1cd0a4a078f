//! SMS gateway client

use anyhow::{Result, bail};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{error, info};

/// Hubtel SMS gateway settings
#[derive(Debug, Clone, Deserialize)]
pub struct HubtelSmsConfig {
    pub base_url: String,
    pub client_key: String,
    pub client_secret: String,
    pub sender_id: String,
}

/// Sends a text message to a phone number
#[async_trait]
pub trait SmsSender: Send + Sync {
    async fn send_sms(&self, mobile_number: &str, content: &str) -> Result<()>;
}

/// Hubtel quick-send client
#[derive(Clone)]
pub struct HubtelSmsClient {
    http: reqwest::Client,
    config: HubtelSmsConfig,
}

impl HubtelSmsClient {
    pub fn new(http: reqwest::Client, config: HubtelSmsConfig) -> Self {
        Self { http, config }
    }
}

#[async_trait]
impl SmsSender for HubtelSmsClient {
    async fn send_sms(&self, mobile_number: &str, content: &str) -> Result<()> {
        let response = self
            .http
            .get(&self.config.base_url)
            .query(&[
                ("clientid", self.config.client_key.as_str()),
                ("clientsecret", self.config.client_secret.as_str()),
                ("from", self.config.sender_id.as_str()),
                ("to", mobile_number),
                ("content", content),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(
                mobile_number = %mobile_number,
                status = %status,
                body = %body,
                "SMS gateway rejected message"
            );
            bail!("SMS gateway returned {}", status);
        }

        info!(mobile_number = %mobile_number, "SMS sent");
        Ok(())
    }
}
