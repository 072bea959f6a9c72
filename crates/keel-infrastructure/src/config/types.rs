//! Configuration types

use crate::constants::{DEFAULT_ENVIRONMENT, DEFAULT_LOG_LEVEL};
use keel_domain::constants::DEFAULT_PAGE_SIZE;
use serde::{Deserialize, Serialize};

/// Seeding configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedingConfig {
    /// Run discovered seeders during bootstrap
    pub run_on_boot: bool,
}

impl Default for SeedingConfig {
    fn default() -> Self {
        Self { run_on_boot: false }
    }
}

/// Query configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Page size applied when a specification does not set one
    pub default_page_size: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, or error
    pub level: String,
    /// Emit JSON-formatted log lines
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json_format: false,
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Runtime environment name used to gate seeders, matched exactly
    pub environment: String,
    /// Seeding configuration
    #[serde(default)]
    pub seeding: SeedingConfig,
    /// Query configuration
    #[serde(default)]
    pub query: QueryConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: DEFAULT_ENVIRONMENT.to_string(),
            seeding: SeedingConfig::default(),
            query: QueryConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}
