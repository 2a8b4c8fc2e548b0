//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `RAZORPAY_KEY_ID` - Public Razorpay key id (`rzp_test_…` or `rzp_live_…`)
//!
//! ## Optional
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_DATA_DIR` - Directory holding the persisted cart (default: ./data)
//! - `STOREFRONT_STATIC_DIR` - Static asset directory (default: crates/storefront/static)
//! - `STORE_NAME` - Name shown in the header and the payment widget (default: FaithWear Co.)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag
//! - `SENTRY_SAMPLE_RATE` - Error sample rate, 0.0-1.0 (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate, 0.0-1.0 (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use faithwear_core::PaymentSettings;
use thiserror::Error;

const DEFAULT_STORE_NAME: &str = "FaithWear Co.";
const RAZORPAY_KEY_PREFIXES: &[&str] = &["rzp_test_", "rzp_live_"];

/// Blocklist of placeholder fragments (case-insensitive) that show up in
/// copy-pasted sample configs.
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "xxx",
    "your-",
    "your_",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "todo",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Directory the cart storage slot lives in
    pub data_dir: PathBuf,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// Store display name
    pub store_name: String,
    /// Razorpay widget configuration
    pub razorpay: RazorpayConfig,
    /// Sentry error tracking configuration
    pub sentry: SentryConfig,
}

/// Razorpay checkout widget configuration.
#[derive(Debug, Clone)]
pub struct RazorpayConfig {
    /// Public key id passed to the widget
    pub key_id: String,
}

/// Sentry configuration. Tracking is disabled when `dsn` is `None`.
#[derive(Debug, Clone)]
pub struct SentryConfig {
    pub dsn: Option<String>,
    pub environment: Option<String>,
    pub sample_rate: f32,
    pub traces_sample_rate: f32,
}

impl Default for SentryConfig {
    fn default() -> Self {
        Self {
            dsn: None,
            environment: None,
            sample_rate: 1.0,
            traces_sample_rate: 0.0,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `RAZORPAY_KEY_ID` is missing or looks like a
    /// placeholder, or if any variable fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_env("STOREFRONT_HOST", "127.0.0.1")?;
        let port = parse_env("STOREFRONT_PORT", "3000")?;
        let data_dir = PathBuf::from(get_env_or_default("STOREFRONT_DATA_DIR", "data"));
        let static_dir = PathBuf::from(get_env_or_default(
            "STOREFRONT_STATIC_DIR",
            "crates/storefront/static",
        ));
        let store_name = get_env_or_default("STORE_NAME", DEFAULT_STORE_NAME);

        let key_id = get_required_env("RAZORPAY_KEY_ID")?;
        validate_razorpay_key_id(&key_id, "RAZORPAY_KEY_ID")?;

        let sentry = SentryConfig {
            dsn: get_optional_env("SENTRY_DSN"),
            environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sample_rate: parse_rate("SENTRY_SAMPLE_RATE", 1.0)?,
            traces_sample_rate: parse_rate("SENTRY_TRACES_SAMPLE_RATE", 0.0)?,
        };

        Ok(Self {
            host,
            port,
            data_dir,
            static_dir,
            store_name,
            razorpay: RazorpayConfig { key_id },
            sentry,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Payment widget settings derived from this configuration.
    #[must_use]
    pub fn payment_settings(&self) -> PaymentSettings {
        PaymentSettings::new(self.razorpay.key_id.clone(), self.store_name.clone())
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable. Empty values count as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_env<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get_env_or_default(key, default)
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Parse a sample rate and check it lies in `0.0..=1.0`.
fn parse_rate(key: &str, default: f32) -> Result<f32, ConfigError> {
    let Some(raw) = get_optional_env(key) else {
        return Ok(default);
    };
    let rate = raw
        .parse::<f32>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    check_rate(rate, key)
}

fn check_rate(rate: f32, key: &str) -> Result<f32, ConfigError> {
    if (0.0..=1.0).contains(&rate) {
        Ok(rate)
    } else {
        Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must be between 0.0 and 1.0 (got {rate})"),
        ))
    }
}

/// Check that a Razorpay key id has a known prefix and is not a placeholder.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] naming `var_name` when the key is rejected.
pub fn validate_razorpay_key_id(key_id: &str, var_name: &str) -> Result<(), ConfigError> {
    let Some(suffix) = RAZORPAY_KEY_PREFIXES
        .iter()
        .find_map(|prefix| key_id.strip_prefix(prefix))
    else {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("must start with one of {}", RAZORPAY_KEY_PREFIXES.join(", ")),
        ));
    };

    if suffix.is_empty() {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            "key id is missing after the prefix".to_string(),
        ));
    }

    let lower = suffix.to_lowercase();
    if let Some(pattern) = PLACEHOLDER_PATTERNS.iter().find(|p| lower.contains(*p)) {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("appears to be a placeholder (contains '{pattern}')"),
        ));
    }

    Ok(())
}
