//! Environment variable parsing helpers
//!
//! Provides ergonomic helpers for reading configuration from environment variables.

use std::env;

/// Read a variable from the real process environment.
pub fn process_env(name: &str) -> Option<String> {
    env::var(name).ok()
}

/// Extension trait for parsing configuration variables.
///
/// Implemented for any `Fn(&str) -> Option<String>` lookup, so the same
/// parsing applies to the process environment (`process_env`) and to a
/// fixed map in tests.
pub trait ConfigExt {
    /// Raw lookup of a variable.
    fn var(&self, name: &str) -> Option<String>;

    /// Get a variable with a default value.
    ///
    /// # Example
    /// ```ignore
    /// let uri = process_env.env_or("MONGO_URI", "mongodb://127.0.0.1:27017");
    /// ```
    fn env_or(&self, name: &str, default: &str) -> String {
        self.var(name).unwrap_or_else(|| default.to_string())
    }

    /// Get a variable, treating an empty value as unset.
    fn env_nonempty(&self, name: &str) -> Option<String> {
        self.var(name).filter(|v| !v.is_empty())
    }

    /// Get a variable as a boolean.
    ///
    /// Returns `true` if the value is "true" (case-insensitive), otherwise `default`.
    fn env_bool(&self, name: &str, default: bool) -> bool {
        self.var(name)
            .map(|v| v.to_lowercase() == "true")
            .unwrap_or(default)
    }
}

impl<F> ConfigExt for F
where
    F: Fn(&str) -> Option<String>,
{
    fn var(&self, name: &str) -> Option<String> {
        self(name)
    }
}

/// Railway-specific environment helpers.
///
/// Provides easy access to Railway platform environment variables.
pub struct RailwayEnv;

impl RailwayEnv {
    /// Get the Railway project ID.
    pub fn project_id() -> String {
        env::var("RAILWAY_PROJECT_ID").unwrap_or_default()
    }

    /// Get the Railway environment ID.
    pub fn environment_id() -> String {
        env::var("RAILWAY_ENVIRONMENT_ID").unwrap_or_default()
    }

    /// Get the service name, used as the node label in telemetry.
    pub fn service_name() -> String {
        env::var("RAILWAY_SERVICE_NAME").unwrap_or_else(|_| "unknown".to_string())
    }

    /// Get the GraphQL endpoint for telemetry.
    pub fn graphql_endpoint() -> String {
        env::var("RAILWAY_GRAPHQL_ENDPOINT")
            .unwrap_or_else(|_| "https://backboard.railway.app/graphql/internal".to_string())
    }
}
