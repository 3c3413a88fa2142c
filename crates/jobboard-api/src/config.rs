//! Process configuration, read from the environment once in `main`.

use jobboard_store::StoreConfig;

use crate::services::notify::ResendConfig;
use crate::services::sheets::SheetsConfig;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    /// Admin login is disabled entirely when unset.
    pub admin_password: Option<String>,
    pub store: StoreConfig,
    pub resend: Option<ResendConfig>,
    pub sheets: Option<SheetsConfig>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3000);
        Self {
            port,
            admin_password: std::env::var("ADMIN_PASSWORD").ok(),
            store: StoreConfig::from_env(),
            resend: ResendConfig::from_env(),
            sheets: SheetsConfig::from_env(),
        }
    }
}
