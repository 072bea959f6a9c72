//! Ports implemented by persistence adapters

pub mod store;

pub use store::{EntityStore, UpdateDepth};
