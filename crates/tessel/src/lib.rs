//! # Tessel - headless tile-world runner
//!
//! Builds a demo level, drives it for a number of steps and reports what happened.

pub mod config;
pub mod scenario;

// Re-export core modules for convenience
pub use tessel_core::entity;
pub use tessel_core::simulation;
pub use tessel_core::world;

pub use config::SimConfig;
pub use scenario::{DemoScenario, RunSummary};
