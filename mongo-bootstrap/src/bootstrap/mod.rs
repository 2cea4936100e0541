//! Application user bootstrap
//!
//! This module provides the provisioning flow for the bootstrap binary:
//! - Reading configuration from the environment
//! - Operator-facing notification
//! - The guarded create-user action
//! - Exit status and failure phase of a run

mod config;
mod notify;
mod provision;
mod report;

pub use config::{Config, DEFAULT_MONGO_URI, PASSWORD_ENV};
pub use notify::{Notifier, TracingNotifier};
pub use provision::{provision, Outcome, MISSING_PASSWORD_MESSAGE};
pub use report::{exit_code, failure, Failure, MISSING_PASSWORD_TELEMETRY};
