use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::utils::constants::{BACKEND_URL, DEFAULT_CACHE_TTL_DAYS, MAX_CACHE_TTL_DAYS};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub backend_url: String,
    pub environment: String,
    pub enable_logging: bool,
    pub cache_config: CacheConfig,
    /// Page size of the public report listing.
    pub list_limit: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: BACKEND_URL.to_string(),
            environment: "development".to_string(),
            enable_logging: true,
            cache_config: CacheConfig::default(),
            list_limit: 100,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    pub ttl_days: i64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_days: DEFAULT_CACHE_TTL_DAYS,
        }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::days(self.ttl_days.clamp(0, MAX_CACHE_TTL_DAYS))
    }
}

impl AppConfig {
    /// Loads the configuration from compile-time environment variables
    pub fn from_env() -> Self {
        Self::from_values(
            option_env!("ENVIRONMENT"),
            option_env!("ENABLE_LOGGING"),
            option_env!("CACHE_TTL_DAYS"),
            option_env!("REPORT_LIST_LIMIT"),
        )
    }

    fn from_values(
        environment: Option<&str>,
        enable_logging: Option<&str>,
        cache_ttl_days: Option<&str>,
        list_limit: Option<&str>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            backend_url: defaults.backend_url,
            environment: environment.unwrap_or("development").to_string(),
            enable_logging: enable_logging
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.enable_logging),
            cache_config: CacheConfig {
                ttl_days: cache_ttl_days
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_CACHE_TTL_DAYS),
            },
            list_limit: list_limit
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.list_limit),
        }
    }

    pub fn backend_url(&self) -> &str {
        &self.backend_url
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_logging_enabled(&self) -> bool {
        self.enable_logging
    }

    pub fn cache_ttl(&self) -> Duration {
        self.cache_config.ttl()
    }
}

// Global static configuration
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}
