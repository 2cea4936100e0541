//! Shared utilities for mongo-bootstrap components
//!
//! This crate provides common functionality used by the bootstrap binaries:
//! - Structured logging initialization
//! - Environment variable parsing helpers
//! - Command execution utilities
//! - Telemetry for reporting events to Railway

pub mod command;
pub mod config;
pub mod logging;
pub mod telemetry;

pub use command::mongosh;
pub use config::{process_env, ConfigExt, RailwayEnv};
pub use logging::init_logging;
pub use telemetry::{Telemetry, TelemetryEvent};
