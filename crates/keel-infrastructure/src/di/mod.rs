//! Dependency-injection composition

pub mod bootstrap;

pub use bootstrap::{AppContext, init_app, init_test_app};
