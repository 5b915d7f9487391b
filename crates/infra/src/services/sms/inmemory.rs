use super::ISmsProvider;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Mutex,
};
use tracing::{info, warn};
use trustkeeper_domain::SmsMessage;

/// Keeps every message in an outbox instead of delivering it. Used when no
/// gateway is configured and in tests.
#[derive(Default)]
pub struct InMemorySmsProvider {
    outbox: Mutex<Vec<SmsMessage>>,
    failing: AtomicBool,
}

impl InMemorySmsProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn outbox(&self) -> Vec<SmsMessage> {
        self.outbox.lock().unwrap().clone()
    }

    /// Makes every following dispatch fail until reset
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl ISmsProvider for InMemorySmsProvider {
    async fn send(&self, message: &SmsMessage) -> anyhow::Result<()> {
        self.send_bulk(std::slice::from_ref(message)).await
    }

    async fn send_bulk(&self, messages: &[SmsMessage]) -> anyhow::Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            warn!("Dropping {} sms messages, outbox is failing", messages.len());
            anyhow::bail!("SMS outbox is unavailable");
        }
        info!("Storing {} sms messages in the outbox", messages.len());
        self.outbox.lock().unwrap().extend_from_slice(messages);
        Ok(())
    }
}
