//! Command execution utilities
//!
//! Provides consistent command execution with proper error handling and logging.

use anyhow::{anyhow, Context, Result};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, instrument};

/// Result of a command execution.
#[derive(Debug)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
    pub code: Option<i32>,
}

impl CommandOutput {
    /// Exit code as text, or "signal" when the process was killed.
    pub fn code_display(&self) -> String {
        self.code
            .map(|c| c.to_string())
            .unwrap_or_else(|| "signal".to_string())
    }
}

/// Run a command and return its output.
///
/// This is a low-level function that returns both stdout and stderr.
/// Use `run_checked` if you want to treat non-zero exit as an error.
pub async fn run(cmd: &str, args: &[&str]) -> Result<CommandOutput> {
    run_with_env(cmd, args, &[]).await
}

/// Run a command with extra environment variables set on the child only.
///
/// Argument values are not logged because callers may pass connection
/// strings or credentials. Env var names are logged, values never.
#[instrument(skip_all, fields(cmd = %cmd))]
pub async fn run_with_env(
    cmd: &str,
    args: &[&str],
    envs: &[(&str, &str)],
) -> Result<CommandOutput> {
    let env_names: Vec<&str> = envs.iter().map(|(name, _)| *name).collect();
    debug!(arg_count = args.len(), env = ?env_names, "Running command");

    let output = Command::new(cmd)
        .args(args)
        .envs(envs.iter().copied())
        .stdin(Stdio::null())
        .output()
        .await
        .context(format!("Failed to execute {}", cmd))?;

    Ok(CommandOutput {
        stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        success: output.status.success(),
        code: output.status.code(),
    })
}

/// Run a command and return stdout if successful, error otherwise.
///
/// # Example
/// ```ignore
/// let version = run_checked("mongosh", &["--version"]).await?;
/// ```
pub async fn run_checked(cmd: &str, args: &[&str]) -> Result<String> {
    let output = run(cmd, args).await?;
    if output.success {
        Ok(output.stdout)
    } else {
        Err(anyhow!(
            "{} failed (exit {}): {}",
            cmd,
            output.code_display(),
            output.stderr
        ))
    }
}

/// Run the MongoDB shell.
///
/// Returns the raw output so callers can decide how to surface a failing
/// exit status.
///
/// # Example
/// ```ignore
/// let out = mongosh("mongosh", &["--quiet", "--eval", "db.version()"], &[]).await?;
/// ```
pub async fn mongosh(bin: &str, args: &[&str], envs: &[(&str, &str)]) -> Result<CommandOutput> {
    run_with_env(bin, args, envs).await
}
