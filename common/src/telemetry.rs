//! Telemetry for reporting events to Railway
//!
//! Provides structured event reporting to Railway's backboard service.

use crate::config::RailwayEnv;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{info, warn};

/// All telemetry events that can be sent to Railway.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TelemetryEvent {
    /// Bootstrap process started
    BootstrapStarted { node: String, database: String },

    /// Bootstrap completed successfully
    BootstrapCompleted {
        node: String,
        duration_ms: u64,
        users_created: Vec<String>,
    },

    /// Bootstrap failed
    BootstrapFailed {
        node: String,
        error: String,
        phase: String,
    },

    /// Component error occurred
    ComponentError {
        component: String,
        error: String,
        context: String,
    },
}

impl TelemetryEvent {
    /// Get the event type name for logging/GraphQL.
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::BootstrapStarted { .. } => "MONGO_BOOTSTRAP_STARTED",
            Self::BootstrapCompleted { .. } => "MONGO_BOOTSTRAP_COMPLETED",
            Self::BootstrapFailed { .. } => "MONGO_BOOTSTRAP_FAILED",
            Self::ComponentError { .. } => "COMPONENT_ERROR",
        }
    }

    /// Convert event to a human-readable message.
    pub fn message(&self) -> String {
        match self {
            Self::BootstrapStarted { node, database } => {
                format!("Bootstrap started on {} for database {}", node, database)
            }
            Self::BootstrapCompleted {
                node,
                duration_ms,
                users_created,
            } => {
                format!(
                    "Bootstrap completed on {} in {}ms (users: {})",
                    node,
                    duration_ms,
                    users_created.join(", ")
                )
            }
            Self::BootstrapFailed { node, error, phase } => {
                format!("Bootstrap failed on {} during {}: {}", node, phase, error)
            }
            Self::ComponentError {
                component,
                error,
                context,
            } => {
                format!("{} error in {}: {}", component, context, error)
            }
        }
    }
}

/// Telemetry client for sending events to Railway.
#[derive(Clone)]
pub struct Telemetry {
    client: Arc<Client>,
    endpoint: String,
    project_id: String,
    environment_id: String,
    component: String,
}

impl Telemetry {
    /// Create a new telemetry client from environment variables.
    pub fn from_env(component: &str) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client: Arc::new(client),
            endpoint: RailwayEnv::graphql_endpoint(),
            project_id: RailwayEnv::project_id(),
            environment_id: RailwayEnv::environment_id(),
            component: component.to_string(),
        }
    }

    /// Build the GraphQL mutation body for an event.
    fn payload(&self, event: &TelemetryEvent) -> Value {
        // Serialize event data as metadata
        let metadata = serde_json::to_string(event).unwrap_or_default();

        json!({
            "query": "mutation telemetrySend($input: TelemetrySendInput!) { telemetrySend(input: $input) }",
            "variables": {
                "input": {
                    "command": event.event_type(),
                    "error": event.message(),
                    "stacktrace": metadata,
                    "projectId": self.project_id,
                    "environmentId": self.environment_id,
                    "version": self.component
                }
            }
        })
    }

    /// Send a telemetry event (fire and forget, non-blocking).
    ///
    /// This spawns a thread to send the event asynchronously.
    /// Errors are logged but do not affect the caller.
    pub fn send(&self, event: TelemetryEvent) {
        let endpoint = self.endpoint.clone();
        let client = Arc::clone(&self.client);

        // Log locally first
        info!(event = %event.event_type(), "{}", event.message());

        let payload = self.payload(&event);

        thread::spawn(move || {
            match client
                .post(&endpoint)
                .header("Content-Type", "application/json")
                .json(&payload)
                .send()
            {
                Ok(resp) if resp.status().is_success() => {}
                Ok(resp) => {
                    warn!("Telemetry got status {}", resp.status());
                }
                Err(e) => {
                    warn!("Telemetry send failed: {}", e);
                }
            }
        });
    }

    /// Send a telemetry event synchronously (blocking).
    ///
    /// Use this for the last event before the process exits, where a
    /// detached thread would be killed before it finishes.
    pub fn send_sync(&self, event: TelemetryEvent) -> Result<(), reqwest::Error> {
        info!(event = %event.event_type(), "{}", event.message());

        self.client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(&self.payload(&event))
            .send()?;

        Ok(())
    }
}
