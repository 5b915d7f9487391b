mod config;
mod locks;
mod repos;
mod services;
mod system;

pub use config::{AdminCredentials, Config, SmsGatewayConfig};
pub use locks::{MeetupGuard, MeetupLocks};
pub use repos::{IHostRepo, IMeetupRepo, IParticipantRepo, IReminderRepo, Repos};
pub use services::*;
use std::sync::Arc;
pub use system::{ISys, MockSys, RealSys};
use tracing::{info, warn};
use trustkeeper_domain::MessageContext;

#[derive(Clone)]
pub struct KeeperContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub sms: Arc<dyn ISmsProvider>,
    pub locks: Arc<MeetupLocks>,
}

impl KeeperContext {
    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
            sms: Arc::new(InMemorySmsProvider::new()),
            locks: Arc::new(MeetupLocks::new()),
        }
    }

    /// How messages to participants are rendered
    pub fn message_context(&self) -> MessageContext {
        MessageContext {
            base_url: self.config.public_base_url.clone(),
            timezone: self.config.display_timezone,
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> anyhow::Result<KeeperContext> {
    let config = Config::new();

    let repos = match std::env::var("DATABASE_URL") {
        Ok(connection_string) => Repos::create_postgres(&connection_string).await?,
        Err(_) => {
            warn!("DATABASE_URL is not set. Using inmemory repositories, data will be lost on restart.");
            Repos::create_inmemory()
        }
    };

    let sms: Arc<dyn ISmsProvider> = match config.sms.clone() {
        Some(gateway) => {
            info!("Using sms gateway at: {}", gateway.api_url);
            Arc::new(HttpSmsProvider::new(gateway))
        }
        None => Arc::new(InMemorySmsProvider::new()),
    };

    Ok(KeeperContext {
        repos,
        config,
        sys: Arc::new(RealSys {}),
        sms,
        locks: Arc::new(MeetupLocks::new()),
    })
}

#[cfg(test)]
pub(crate) fn setup_inmemory_context() -> KeeperContext {
    KeeperContext::create_inmemory()
}
