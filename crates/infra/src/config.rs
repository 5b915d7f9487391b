use chrono_tz::Tz;
use trustkeeper_utils::create_random_secret;
use tracing::{info, warn};

/// Credentials of the SMS gateway. All of them must be present for the
/// gateway to be used.
#[derive(Debug, Clone)]
pub struct SmsGatewayConfig {
    pub api_url: String,
    pub api_key: String,
    pub api_secret: String,
    /// Phone number the messages are sent from
    pub sender: String,
}

#[derive(Debug, Clone)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Secret used to sign host and admin session tokens
    pub session_secret: String,
    /// Lifetime of a session token in seconds
    pub session_ttl_secs: i64,
    /// Operator credentials, admin login is disabled when absent
    pub admin: Option<AdminCredentials>,
    /// Origin used to build the confirm and cancel links sent to participants
    pub public_base_url: String,
    /// Timezone meetup dates are rendered in for participants
    pub display_timezone: Tz,
    pub sms: Option<SmsGatewayConfig>,
    /// Participants holding a slot can not cancel when the meetup is closer than this
    pub cancellation_cutoff_millis: i64,
    /// Capacity used when a meetup is created without one
    pub default_capacity: i64,
}

impl Config {
    pub fn new() -> Self {
        let session_secret = match std::env::var("SESSION_SECRET") {
            Ok(secret) => secret,
            Err(_) => {
                info!("Did not find SESSION_SECRET environment variable. Going to create one.");
                warn!("Sessions will not survive a restart of the application.");
                create_random_secret(32)
            }
        };

        let default_port = 5000;
        let port = parse_env_or("PORT", default_port);
        let session_ttl_secs = parse_env_or("SESSION_TTL_SECS", 60 * 60 * 24);

        let admin = match (
            std::env::var("ADMIN_USERNAME"),
            std::env::var("ADMIN_PASSWORD"),
        ) {
            (Ok(username), Ok(password)) if !username.is_empty() && !password.is_empty() => {
                Some(AdminCredentials { username, password })
            }
            _ => {
                info!("ADMIN_USERNAME or ADMIN_PASSWORD not set. Admin login is disabled.");
                None
            }
        };

        let public_base_url = std::env::var("PUBLIC_BASE_URL").unwrap_or_else(|_| {
            let url = "http://localhost:3000".to_string();
            info!("Did not find PUBLIC_BASE_URL, links will point to: {}", url);
            url
        });

        let default_timezone = chrono_tz::Asia::Seoul;
        let display_timezone = match std::env::var("DISPLAY_TIMEZONE") {
            Ok(tz) => match tz.parse::<Tz>() {
                Ok(tz) => tz,
                Err(_) => {
                    warn!(
                        "The given DISPLAY_TIMEZONE: {} is not valid, falling back to: {}.",
                        tz, default_timezone
                    );
                    default_timezone
                }
            },
            Err(_) => default_timezone,
        };

        let sms = match (
            std::env::var("SMS_API_URL"),
            std::env::var("SMS_API_KEY"),
            std::env::var("SMS_API_SECRET"),
            std::env::var("SMS_SENDER"),
        ) {
            (Ok(api_url), Ok(api_key), Ok(api_secret), Ok(sender)) => Some(SmsGatewayConfig {
                api_url,
                api_key,
                api_secret,
                sender,
            }),
            _ => {
                warn!("SMS gateway is not configured. Messages will only be logged.");
                None
            }
        };

        Self {
            port,
            session_secret,
            session_ttl_secs,
            admin,
            public_base_url,
            display_timezone,
            sms,
            cancellation_cutoff_millis: 1000 * 60 * 60 * 24, // 24 hours
            default_capacity: 10,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Display,
{
    match std::env::var(key) {
        Ok(value) => match value.parse::<T>() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!(
                    "The given {}: {} is not valid, falling back to the default: {}.",
                    key, value, default
                );
                default
            }
        },
        Err(_) => default,
    }
}
