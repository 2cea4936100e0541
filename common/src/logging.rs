//! Structured logging initialization
//!
//! Provides consistent logging initialization across all mongo-bootstrap components.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Guard that keeps the tracing subscriber active.
/// Drop this at the end of main to flush logs.
pub struct LogGuard;

/// Initialize structured logging for a component.
///
/// Set `LOG_FORMAT=json` to emit one JSON object per line instead of the
/// human-readable format.
///
/// # Example
/// ```ignore
/// let _guard = init_logging("create-app-user");
/// info!("Starting up...");
/// ```
pub fn init_logging(component: &str) -> LogGuard {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);

    if std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json")) {
        registry
            .with(fmt::layer().json().with_target(false))
            .init();
    } else {
        registry.with(fmt::layer().with_target(false)).init();
    }

    tracing::debug!(component, "Logging initialized");

    LogGuard
}
