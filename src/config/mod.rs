use crate::core::{AppError, Result};
use rust_decimal::Decimal;
use std::env;
use std::str::FromStr;

pub mod database;
pub mod server;

pub use database::DatabaseConfig;
pub use server::ServerConfig;

/// Default trailing window for the loyalty report
pub const DEFAULT_WINDOW_DAYS: u32 = 30;

/// Longest accepted trailing window (one hundred years)
pub const MAX_WINDOW_DAYS: u32 = 36_500;

/// Default minimum aggregate a customer must exceed to be reported
pub const DEFAULT_THRESHOLD: i64 = 5_000_000;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub loyalty: LoyaltyConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
    pub log_format: LogFormat,
    pub seed_demo_data: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Parameters of the loyalty report
#[derive(Debug, Clone, PartialEq)]
pub struct LoyaltyConfig {
    pub window_days: u32,
    pub threshold: Decimal,
}

impl Default for LoyaltyConfig {
    fn default() -> Self {
        Self {
            window_days: DEFAULT_WINDOW_DAYS,
            threshold: Decimal::from(DEFAULT_THRESHOLD),
        }
    }
}

impl LoyaltyConfig {
    pub fn from_env() -> Result<Self> {
        let window_days = match env::var("LOYALTY_WINDOW_DAYS") {
            Ok(raw) => raw.parse().map_err(|_| {
                AppError::Configuration("Invalid LOYALTY_WINDOW_DAYS".to_string())
            })?,
            Err(_) => DEFAULT_WINDOW_DAYS,
        };

        let threshold = match env::var("LOYALTY_THRESHOLD") {
            Ok(raw) => Decimal::from_str(raw.trim()).map_err(|_| {
                AppError::Configuration("Invalid LOYALTY_THRESHOLD".to_string())
            })?,
            Err(_) => Decimal::from(DEFAULT_THRESHOLD),
        };

        Ok(Self {
            window_days,
            threshold,
        })
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let log_format = match env::var("LOG_FORMAT")
            .unwrap_or_else(|_| "pretty".to_string())
            .to_lowercase()
            .as_str()
        {
            "pretty" => LogFormat::Pretty,
            "json" => LogFormat::Json,
            other => {
                return Err(AppError::Configuration(format!(
                    "Invalid LOG_FORMAT '{}' (expected 'pretty' or 'json')",
                    other
                )))
            }
        };

        let config = Config {
            app: AppConfig {
                env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
                log_format,
                seed_demo_data: env::var("SEED_DEMO_DATA")
                    .unwrap_or_else(|_| "false".to_string())
                    .parse()
                    .map_err(|_| AppError::Configuration("Invalid SEED_DEMO_DATA".to_string()))?,
            },
            database: DatabaseConfig::from_env()?,
            server: ServerConfig::from_env()?,
            loyalty: LoyaltyConfig::from_env()?,
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.loyalty.window_days == 0 {
            return Err(AppError::Configuration(
                "Loyalty window must be at least one day".to_string(),
            ));
        }

        if self.loyalty.window_days > MAX_WINDOW_DAYS {
            return Err(AppError::Configuration(format!(
                "Loyalty window must not exceed {} days",
                MAX_WINDOW_DAYS
            )));
        }

        if self.loyalty.threshold.is_sign_negative() {
            return Err(AppError::Configuration(
                "Loyalty threshold must not be negative".to_string(),
            ));
        }

        if self.server.workers == 0 {
            return Err(AppError::Configuration(
                "Server workers must be greater than 0".to_string(),
            ));
        }

        self.database.validate()
    }
}
