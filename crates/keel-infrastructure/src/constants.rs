//! Infrastructure constants

/// Environment-variable prefix for configuration overrides
pub const CONFIG_ENV_PREFIX: &str = "KEEL";

/// Default configuration file name looked up in the working directory
pub const DEFAULT_CONFIG_FILENAME: &str = "keel.toml";

/// Environment variable consulted for the tracing filter
pub const LOG_FILTER_ENV: &str = "KEEL_LOG";

/// Environment name applied when none is configured
pub const DEFAULT_ENVIRONMENT: &str = "Development";

/// Log level applied when none is configured
pub const DEFAULT_LOG_LEVEL: &str = "info";
