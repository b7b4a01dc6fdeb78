//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; the defaults run a local shop out of
//! `./catalog` and `./data`.
//!
//! - `SURA_HOST` - Bind address (default: 127.0.0.1)
//! - `SURA_PORT` - Listen port (default: 3000)
//! - `SURA_BASE_URL` - Public URL (default: <http://localhost:3000>)
//! - `SURA_CATALOG_DIR` - Product image folders (default: catalog)
//! - `SURA_DATA_DIR` - JSON stores for orders/accounts (default: data)
//! - `SURA_DEFAULT_PRICE` - Unit price for products without an override (default: 10.00)
//! - `SURA_PAYPAL_LINK` / `SURA_CASHAPP_LINK` / `SURA_ZELLE_INFO` - Manual payment targets
//! - `SURA_INSTAGRAM` / `SURA_TIKTOK` / `SURA_CONTACT_EMAIL` - Contact handles
//! - `SENTRY_DSN` / `SENTRY_ENVIRONMENT` - Error tracking

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use sura_core::Price;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
///
/// Built once at startup and shared immutably through [`crate::state::AppState`].
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Root directory scanned for product folders
    pub catalog_dir: PathBuf,
    /// Directory holding `orders.json` and `users.json`
    pub data_dir: PathBuf,
    /// Unit price for products without an override
    pub default_price: Price,
    /// Manual settlement links and contact handles
    pub shop: ShopConfig,
    /// Sentry error tracking
    pub sentry_dsn: Option<String>,
    pub sentry_environment: Option<String>,
    pub sentry_sample_rate: f32,
    pub sentry_traces_sample_rate: f32,
}

/// Static payment links and contact handles rendered on the payment and
/// content pages. These are never called programmatically.
#[derive(Debug, Clone)]
pub struct ShopConfig {
    pub paypal_link: String,
    pub cashapp_link: String,
    pub zelle_info: String,
    pub instagram: String,
    pub tiktok: String,
    pub contact_email: String,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but unparsable.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("SURA_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("SURA_HOST".to_owned(), e.to_string()))?;
        let port = get_env_or_default("SURA_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("SURA_PORT".to_owned(), e.to_string()))?;
        let base_url = get_env_or_default("SURA_BASE_URL", "http://localhost:3000");
        let catalog_dir = PathBuf::from(get_env_or_default("SURA_CATALOG_DIR", "catalog"));
        let data_dir = PathBuf::from(get_env_or_default("SURA_DATA_DIR", "data"));
        let default_price = get_env_or_default("SURA_DEFAULT_PRICE", "10.00")
            .parse::<Price>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("SURA_DEFAULT_PRICE".to_owned(), e.to_string())
            })?;

        let shop = ShopConfig::from_env();

        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = parse_rate("SENTRY_SAMPLE_RATE", 1.0)?;
        let sentry_traces_sample_rate = parse_rate("SENTRY_TRACES_SAMPLE_RATE", 0.0)?;

        Ok(Self {
            host,
            port,
            base_url,
            catalog_dir,
            data_dir,
            default_price,
            shop,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl ShopConfig {
    fn from_env() -> Self {
        Self {
            paypal_link: get_env_or_default("SURA_PAYPAL_LINK", "https://www.paypal.me/TheOfficialSura"),
            cashapp_link: get_env_or_default("SURA_CASHAPP_LINK", "https://cash.app/$TheOfficialSura"),
            zelle_info: get_env_or_default("SURA_ZELLE_INFO", "Phone: +1-862-307-2294"),
            instagram: get_env_or_default("SURA_INSTAGRAM", "@TheOfficial.Sura"),
            tiktok: get_env_or_default("SURA_TIKTOK", "@TheOfficial.Sura"),
            contact_email: get_env_or_default(
                "SURA_CONTACT_EMAIL",
                "theofficialsura22@gmail.com",
            ),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse a sample-rate variable in the 0.0..=1.0 range.
fn parse_rate(key: &str, default: f32) -> Result<f32, ConfigError> {
    let Some(raw) = get_optional_env(key) else {
        return Ok(default);
    };
    let rate = raw
        .parse::<f32>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_owned(), e.to_string()))?;
    if !(0.0..=1.0).contains(&rate) {
        return Err(ConfigError::InvalidEnvVar(
            key.to_owned(),
            format!("must be between 0.0 and 1.0 (got {rate})"),
        ));
    }
    Ok(rate)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn test_config() -> StorefrontConfig {
        StorefrontConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: "http://localhost:3000".to_owned(),
            catalog_dir: PathBuf::from("catalog"),
            data_dir: PathBuf::from("data"),
            default_price: Price::from_dollars(10),
            shop: ShopConfig {
                paypal_link: "https://www.paypal.me/TheOfficialSura".to_owned(),
                cashapp_link: "https://cash.app/$TheOfficialSura".to_owned(),
                zelle_info: "Phone: +1-862-307-2294".to_owned(),
                instagram: "@TheOfficial.Sura".to_owned(),
                tiktok: "@TheOfficial.Sura".to_owned(),
                contact_email: "theofficialsura22@gmail.com".to_owned(),
            },
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }

    #[test]
    fn test_socket_addr() {
        let config = test_config();
        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_parse_rate_default() {
        // Variable unset falls back to the default
        assert!((parse_rate("SURA_TEST_RATE_UNSET", 0.25).unwrap() - 0.25).abs() < f32::EPSILON);
    }
}
