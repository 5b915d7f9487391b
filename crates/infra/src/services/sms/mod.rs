mod http;
mod inmemory;

pub use http::HttpSmsProvider;
pub use inmemory::InMemorySmsProvider;
use trustkeeper_domain::SmsMessage;

/// Delivery channel for text messages to participants.
///
/// A failing batch is reported as a single error, delivery is not tracked
/// per recipient.
#[async_trait::async_trait]
pub trait ISmsProvider: Send + Sync {
    async fn send(&self, message: &SmsMessage) -> anyhow::Result<()>;
    async fn send_bulk(&self, messages: &[SmsMessage]) -> anyhow::Result<()>;
}
