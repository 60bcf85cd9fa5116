//! Configuration management for the Libris server

use config::{Config, ConfigError, Environment, File};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

/// Global lending policy.
///
/// The loan period and fine rate apply uniformly to every book; there is no
/// per-category policy.
#[derive(Debug, Deserialize, Clone)]
pub struct LoanPolicy {
    /// Days between borrow date and due date
    pub loan_period_days: i64,
    /// Days added to the due date on renewal
    pub renew_extension_days: i64,
    /// Fine accrued per whole day late
    pub daily_fine_rate: Decimal,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    /// Seed the store with a demonstration catalog at startup
    pub seed_demo: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub loans: LoanPolicy,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default"))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add environment variables (with prefix LIBRIS_)
            .add_source(
                Environment::with_prefix("LIBRIS")
                    .separator("_")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Default for LoanPolicy {
    fn default() -> Self {
        Self {
            loan_period_days: 30,
            renew_extension_days: 30,
            daily_fine_rate: dec!(0.50),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self { seed_demo: false }
    }
}
