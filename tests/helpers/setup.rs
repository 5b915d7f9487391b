use std::sync::Arc;
use trustkeeper_api::Application;
use trustkeeper_infra::{AdminCredentials, Config, InMemorySmsProvider, KeeperContext, MockSys};
use trustkeeper_sdk::KeeperSDK;

pub const HOUR: i64 = 1000 * 60 * 60;
pub const DAY: i64 = 24 * HOUR;
pub const NOW: i64 = 1_700_000_000_000;
pub const ADMIN_USERNAME: &str = "operator";
pub const ADMIN_PASSWORD: &str = "operator-secret";

pub struct TestApp {
    pub config: Config,
    pub address: String,
    /// Clock of the server, starts at `NOW`
    pub sys: Arc<MockSys>,
    /// Every sms the server dispatched
    pub sms: Arc<InMemorySmsProvider>,
}

impl TestApp {
    pub fn host_client(&self, host_code: &str) -> KeeperSDK {
        KeeperSDK::with_host_code(self.address.clone(), host_code.to_string())
    }

    pub fn session_client(&self, token: &str) -> KeeperSDK {
        KeeperSDK::with_session(self.address.clone(), token.to_string())
    }
}

// Launch the application as a background task
pub async fn spawn_app() -> (TestApp, KeeperSDK) {
    let sys = Arc::new(MockSys::new(NOW));
    let sms = Arc::new(InMemorySmsProvider::new());

    let mut ctx = KeeperContext::create_inmemory();
    ctx.config.port = 0; // Random port
    ctx.config.public_base_url = "https://keeper.test".into();
    ctx.config.admin = Some(AdminCredentials {
        username: ADMIN_USERNAME.into(),
        password: ADMIN_PASSWORD.into(),
    });
    ctx.sys = sys.clone();
    ctx.sms = sms.clone();

    let config = ctx.config.clone();
    let application = Application::new(ctx)
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    let app = TestApp {
        config,
        address: address.clone(),
        sys,
        sms,
    };
    let sdk = KeeperSDK::new(address);
    (app, sdk)
}
