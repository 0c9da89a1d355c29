//! Configuration loaded from the environment

use std::{env, fmt::Display, str::FromStr};

use tracing::info;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    /// Origin allowed by the CORS layer (the frontend dev server by default).
    pub cors_origin: String,
    /// Public tracking page URL embedded in notification emails.
    pub tracking_url: String,
    /// Transactional-email HTTP API endpoint; notifications are dropped
    /// when unset.
    pub mail_endpoint: Option<String>,
    pub mail_token: Option<String>,
    pub mail_from: String,
    #[cfg(feature = "mongodb_backend")]
    pub mongo_uri: String,
    #[cfg(feature = "mongodb_backend")]
    pub mongo_db: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: try_load("PORT", "5000"),
            cors_origin: try_load("CORS_ORIGIN", "http://localhost:5173"),
            tracking_url: try_load("TRACKING_URL", "http://localhost:5173/tracking"),
            mail_endpoint: var_opt("MAIL_API_URL"),
            mail_token: var_opt("MAIL_API_TOKEN"),
            mail_from: try_load("MAIL_FROM", "logistics@agrilink.example"),
            #[cfg(feature = "mongodb_backend")]
            mongo_uri: try_load("MONGO_URI", "mongodb://localhost:27017"),
            #[cfg(feature = "mongodb_backend")]
            mongo_db: try_load("MONGO_DB", "agrilink"),
        }
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    env::var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| format!("invalid {key} value: {e}"))
        .expect("Environment misconfigured!")
}

fn var_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.is_empty())
}
