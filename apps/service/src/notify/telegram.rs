use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use tracing::{debug, info};

use super::Notifier;
use crate::error::NotifyDeliveryError;
use crate::proxy::ClientFactory;

/// `sendMessage` request body
#[derive(Debug, Serialize)]
pub struct SendMessage<'a> {
    pub chat_id: &'a str,
    pub text: &'a str,
}

/// Posts messages to a Telegram bot endpoint through the proxy
pub struct TelegramNotifier {
    clients: Arc<dyn ClientFactory>,
    endpoint: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(
        clients: Arc<dyn ClientFactory>,
        endpoint: impl Into<String>,
        chat_id: impl Into<String>,
    ) -> Self {
        Self { clients, endpoint: endpoint.into(), chat_id: chat_id.into() }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, text: &str) -> Result<(), NotifyDeliveryError> {
        let payload = serde_json::to_vec(&SendMessage { chat_id: &self.chat_id, text })?;
        let client = self.clients.build()?;

        let response = client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyDeliveryError::Status(status));
        }

        debug!(chat_id = %self.chat_id, %status, "Messaging API accepted notification");
        info!("Message sent to Telegram: {text}");
        Ok(())
    }
}
