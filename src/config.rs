use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;

const SCRIPT_URL_PLACEHOLDER: &str = "YOUR_SCRIPT_URL_HERE";

/// Whether `url` points at a deployed sheet script rather than the template
/// placeholder.
pub fn is_script_url_configured(url: &str) -> bool {
    !url.trim().is_empty() && !url.contains(SCRIPT_URL_PLACEHOLDER)
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_address: SocketAddr,
    pub script_url: Option<String>,
    pub jwt_secret: String,
    pub admin_username: String,
    pub admin_password: String,
    pub admin_password_hash: Option<String>,
    pub holidays_file: Option<PathBuf>,
    pub availability_poll_interval: Duration,
    pub remote_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = std::env::var("PORT")
            .ok()
            .and_then(|port| port.parse::<u16>().ok())
            .unwrap_or(5000);

        let bind_address = format!("{}:{}", host, port)
            .parse()
            .with_context(|| format!("Invalid bind address {}:{}", host, port))?;

        let script_url = std::env::var("SCRIPT_URL").ok();

        let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            use rand::Rng;
            let mut rng = rand::thread_rng();
            let bytes: [u8; 32] = rng.gen();
            use base64::Engine;
            base64::engine::general_purpose::STANDARD.encode(bytes)
        });

        let admin_username =
            std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string());
        let admin_password =
            std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".to_string());
        let admin_password_hash = std::env::var("ADMIN_PASSWORD_HASH").ok();

        let holidays_file = std::env::var("HOLIDAYS_FILE").ok().map(PathBuf::from);

        let availability_poll_interval = Duration::from_secs(secs_from_env("AVAILABILITY_POLL_SECS", 60));
        let remote_timeout = Duration::from_secs(secs_from_env("REMOTE_TIMEOUT_SECS", 20));

        Ok(Self {
            bind_address,
            script_url,
            jwt_secret,
            admin_username,
            admin_password,
            admin_password_hash,
            holidays_file,
            availability_poll_interval,
            remote_timeout,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.script_url
            .as_deref()
            .map(is_script_url_configured)
            .unwrap_or(false)
    }
}

fn secs_from_env(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .unwrap_or(default)
}
