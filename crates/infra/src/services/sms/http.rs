use super::ISmsProvider;
use crate::config::SmsGatewayConfig;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use trustkeeper_domain::SmsMessage;

#[derive(Debug, Serialize)]
struct GatewayMessage<'a> {
    to: &'a str,
    from: &'a str,
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GatewayRequest<'a> {
    messages: Vec<GatewayMessage<'a>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GatewayResponse {
    #[serde(default)]
    group_id: Option<String>,
}

/// Sends messages through an HTTP SMS gateway
pub struct HttpSmsProvider {
    client: Client,
    config: SmsGatewayConfig,
}

impl HttpSmsProvider {
    pub fn new(config: SmsGatewayConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[async_trait::async_trait]
impl ISmsProvider for HttpSmsProvider {
    async fn send(&self, message: &SmsMessage) -> anyhow::Result<()> {
        self.send_bulk(std::slice::from_ref(message)).await
    }

    async fn send_bulk(&self, messages: &[SmsMessage]) -> anyhow::Result<()> {
        if messages.is_empty() {
            info!("No messages provided, skipping sms dispatch");
            return Ok(());
        }

        let body = GatewayRequest {
            messages: messages
                .iter()
                .map(|m| GatewayMessage {
                    to: &m.to,
                    from: &self.config.sender,
                    text: &m.text,
                })
                .collect(),
        };

        info!("Sending {} sms messages to the gateway", messages.len());
        let response = self
            .client
            .post(&self.config.api_url)
            .basic_auth(&self.config.api_key, Some(&self.config.api_secret))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to reach the sms gateway: {}", e);
                e
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!(
                "SMS gateway returned error status {}: {}",
                status, error_text
            );
            anyhow::bail!("SMS gateway error: {} - {}", status, error_text);
        }

        let gateway_response: GatewayResponse = response.json().await.unwrap_or(GatewayResponse {
            group_id: None,
        });
        info!(
            "Successfully sent {} sms messages, group: {:?}",
            messages.len(),
            gateway_response.group_id
        );
        Ok(())
    }
}
