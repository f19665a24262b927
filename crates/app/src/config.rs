//! Application configuration loaded from environment variables.

use std::path::PathBuf;

const DEFAULT_CURRENCY_DATA: &str =
    concat!(env!("CARGO_MANIFEST_DIR"), "/data/currency_conversion.json");
const DEFAULT_CATALOG_DATA: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/products.json");

/// Output format of the log layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        }
    }
}

/// Runner configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `CHECKOUT_CURRENCY_DATA`: exchange-rate table (default: the bundled
///   `data/currency_conversion.json`)
/// - `CHECKOUT_CATALOG_DATA`: product catalog (default: the bundled
///   `data/products.json`)
/// - `CHECKOUT_SHIPPING_RATE_USD`: flat shipping rate (default: `8.99`)
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
/// - `LOG_FORMAT`: `pretty` or `json` (default: `pretty`)
///
/// The bundled defaults are absolute paths into this crate's source tree, so
/// the runner finds them from any working directory. A relative override is
/// resolved against the working directory.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub currency_data: PathBuf,
    pub catalog_data: PathBuf,
    pub shipping_rate_usd: f64,
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration from an arbitrary key lookup.
    ///
    /// Unparseable or negative shipping rates fall back to the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            currency_data: lookup("CHECKOUT_CURRENCY_DATA")
                .map(PathBuf::from)
                .unwrap_or(defaults.currency_data),
            catalog_data: lookup("CHECKOUT_CATALOG_DATA")
                .map(PathBuf::from)
                .unwrap_or(defaults.catalog_data),
            shipping_rate_usd: lookup("CHECKOUT_SHIPPING_RATE_USD")
                .and_then(|r| r.trim().parse::<f64>().ok())
                .filter(|r| r.is_finite() && *r >= 0.0)
                .unwrap_or(defaults.shipping_rate_usd),
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
            log_format: lookup("LOG_FORMAT")
                .map(|f| LogFormat::parse(&f))
                .unwrap_or(defaults.log_format),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_data: PathBuf::from(DEFAULT_CURRENCY_DATA),
            catalog_data: PathBuf::from(DEFAULT_CATALOG_DATA),
            shipping_rate_usd: checkout::services::shipping::DEFAULT_FLAT_RATE_USD,
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}
