//! Keel Infrastructure Layer
//!
//! Adapters and composition for the Keel toolkit: figment-based
//! configuration loading, tracing initialization, the in-memory entity
//! store with its unit-of-work session discipline, the built-in installers
//! contributed to the application registry, and the bootstrap composition
//! root.

pub mod config;
pub mod constants;
pub mod di;
pub mod installers;
pub mod logging;
pub mod memory;

pub use config::{AppConfig, ConfigLoader, LoggingConfig, QueryConfig, SeedingConfig};
pub use di::bootstrap::{AppContext, init_app, init_test_app};
pub use installers::{CoreServicesInstaller, SeedingInstaller};
pub use logging::{init_logging, parse_log_level};
pub use memory::{Clock, InMemoryStore, SessionPool, StoreContext, StoreSession};
