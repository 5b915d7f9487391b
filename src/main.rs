mod telemetry;

use telemetry::{get_subscriber, init_subscriber};
use trustkeeper_api::Application;
use trustkeeper_infra::setup_context;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    openssl_probe::init_ssl_cert_env_vars();

    let subscriber = get_subscriber("trustkeeper_server".into(), "info".into());
    init_subscriber(subscriber);

    let context = setup_context()
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;

    let app = Application::new(context).await?;
    app.start().await
}
