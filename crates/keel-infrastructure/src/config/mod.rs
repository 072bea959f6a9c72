//! Configuration
//!
//! Types and loading for the application configuration surface:
//! environment name, seeding behavior, query defaults, and logging.

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{AppConfig, LoggingConfig, QueryConfig, SeedingConfig};
