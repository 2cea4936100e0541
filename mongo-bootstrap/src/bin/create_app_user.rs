//! MongoDB application user bootstrap
//!
//! Runs ONCE against a freshly initialized MongoDB deployment and creates
//! the `chatfleet` user with `readWrite` on the `chatfleet` database.
//! The password comes from MONGO_APP_PASSWORD.

use anyhow::{Context, Result};
use common::command::run_checked;
use common::{init_logging, RailwayEnv, Telemetry, TelemetryEvent};
use mongo_bootstrap::{
    exit_code, failure, provision, Config, MongoshAdministrator, TracingNotifier, APP_DB, APP_USER,
};
use std::time::Instant;
use tracing::{error, info, warn};

fn main() -> Result<()> {
    let _guard = init_logging("create-app-user");

    let start = Instant::now();
    let telemetry = Telemetry::from_env("mongo-bootstrap");
    let node_name = RailwayEnv::service_name();

    info!("Application user bootstrap starting...");

    telemetry.send(TelemetryEvent::BootstrapStarted {
        node: node_name.clone(),
        database: APP_DB.to_string(),
    });

    let config = Config::from_env();
    info!(config = ?config, "Loaded configuration");

    let admin = MongoshAdministrator::from_config(&config);

    // Telemetry uses a blocking HTTP client, so the runtime only lives
    // for the duration of the mongosh calls.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to build tokio runtime")?;

    let result = runtime.block_on(async {
        match run_checked(&config.mongosh_bin, &["--version"]).await {
            Ok(version) => info!(version = %version, "Found mongosh"),
            Err(e) => {
                warn!(error = %e, "Could not determine mongosh version");
                telemetry.send(TelemetryEvent::ComponentError {
                    component: "mongosh".to_string(),
                    error: e.to_string(),
                    context: "version_check".to_string(),
                });
            }
        }

        provision(&config, &admin, &TracingNotifier).await
    });
    drop(runtime);

    let duration_ms = start.elapsed().as_millis() as u64;

    if let Err(e) = &result {
        error!(error = %e, "Failed to create application user");
    }

    let event = match failure(&result) {
        Some(failure) => TelemetryEvent::BootstrapFailed {
            node: node_name,
            error: failure.error,
            phase: failure.phase.to_string(),
        },
        None => TelemetryEvent::BootstrapCompleted {
            node: node_name,
            duration_ms,
            users_created: vec![APP_USER.to_string()],
        },
    };
    if let Err(e) = telemetry.send_sync(event) {
        warn!("Telemetry send failed: {}", e);
    }

    let code = exit_code(&result, config.strict);
    if code != 0 {
        std::process::exit(code);
    }

    info!(duration_ms, "Application user bootstrap finished");
    Ok(())
}
