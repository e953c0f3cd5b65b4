use std::time::Duration;

use serde::Deserialize;

use super::Environment;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub environment: Environment,
    pub api: ApiSettings,
    pub cache: CacheSettings,
    pub provisioning: ProvisioningSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiSettings {
    pub base_url: String,
    pub scraper_url: String,
    pub redeploy_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    pub ttl_seconds: u64,
}

impl CacheSettings {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProvisioningSettings {
    pub max_polls: u32,
    pub poll_delay_seconds: u64,
}

impl ProvisioningSettings {
    pub fn poll_delay(&self) -> Duration {
        Duration::from_secs(self.poll_delay_seconds)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl Settings {
    /// Build settings from environment variables with sane defaults; only
    /// the API base URLs are required in production setups.
    pub fn from_env() -> Self {
        Self {
            environment: std::env::var("APP_ENV")
                .ok()
                .and_then(|v| Environment::try_from(v).ok())
                .unwrap_or(Environment::Local),
            api: ApiSettings {
                base_url: env_or("API_URL", "http://localhost:8080"),
                scraper_url: env_or("API_SCRAPER_URL", "http://localhost:8081"),
                redeploy_url: env_or("REDEPLOY_URL", ""),
            },
            cache: CacheSettings {
                ttl_seconds: env_parse_or("CACHE_TTL_SECONDS", 300),
            },
            provisioning: ProvisioningSettings {
                max_polls: env_parse_or("PROVISIONING_MAX_POLLS", 20),
                poll_delay_seconds: env_parse_or("PROVISIONING_POLL_DELAY_SECONDS", 30),
            },
            logging: LoggingSettings {
                level: env_or("LOG_LEVEL", "info"),
                enable_json: std::env::var("LOG_FORMAT")
                    .map(|v| v.to_lowercase() == "json")
                    .unwrap_or(false),
            },
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
