//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `STORE_STORAGE_PATH` - Local storage file (default: .clothes_store/local_storage.json)
//! - `STORE_CURRENCY` - ISO 4217 display currency (default: USD)
//! - `STORE_DELIVERY_FEE` - Flat delivery fee for a non-empty cart (default: 20)
//! - `STORE_FREE_DELIVERY_THRESHOLD` - Subtotal above which delivery is free (default: 200)
//! - `STORE_TOAST_DURATION_MS` - How long a toast stays visible (default: 2200)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use clothes_store_core::CurrencyCode;
use rust_decimal::Decimal;
use thiserror::Error;

const DEFAULT_STORAGE_PATH: &str = ".clothes_store/local_storage.json";
const DEFAULT_TOAST_MS: u64 = 2200;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path of the local storage file
    pub storage_path: PathBuf,
    /// Currency used to display prices
    pub currency: CurrencyCode,
    /// Delivery pricing for the cart summary
    pub delivery: DeliveryPolicy,
    /// How long each toast stays visible
    pub toast_duration: Duration,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            currency: CurrencyCode::default(),
            delivery: DeliveryPolicy::default(),
            toast_duration: Duration::from_millis(DEFAULT_TOAST_MS),
            sentry_dsn: None,
        }
    }
}

/// Flat-fee delivery, waived above a subtotal threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryPolicy {
    /// Fee charged when the subtotal is above zero
    pub fee: Decimal,
    /// Delivery is free when the subtotal is strictly greater than this
    pub free_threshold: Decimal,
}

impl Default for DeliveryPolicy {
    fn default() -> Self {
        Self {
            fee: Decimal::new(20, 0),
            free_threshold: Decimal::new(200, 0),
        }
    }
}

impl StoreConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let storage_path = PathBuf::from(get_env_or_default(
            "STORE_STORAGE_PATH",
            DEFAULT_STORAGE_PATH,
        ));
        let currency = parse_env("STORE_CURRENCY", CurrencyCode::default())?;
        let delivery = DeliveryPolicy::from_env()?;
        let toast_ms = parse_env("STORE_TOAST_DURATION_MS", DEFAULT_TOAST_MS)?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            storage_path,
            currency,
            delivery,
            toast_duration: Duration::from_millis(toast_ms),
            sentry_dsn,
        })
    }
}

impl DeliveryPolicy {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let fee = parse_env("STORE_DELIVERY_FEE", defaults.fee)?;
        let free_threshold = parse_env("STORE_FREE_DELIVERY_THRESHOLD", defaults.free_threshold)?;

        if fee.is_sign_negative() && !fee.is_zero() {
            return Err(ConfigError::InvalidEnvVar(
                "STORE_DELIVERY_FEE".to_string(),
                "must not be negative".to_string(),
            ));
        }

        Ok(Self {
            fee,
            free_threshold,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable, treating blank values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Parse an optional environment variable, falling back to `default`.
fn parse_env<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    get_optional_env(key).map_or(Ok(default), |raw| parse_value(key, &raw))
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}
