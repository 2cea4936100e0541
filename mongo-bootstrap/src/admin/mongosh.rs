//! `mongosh`-backed user administration
//!
//! Runs the MongoDB shell once per request with a generated `--eval`
//! script. The user password travels to the child through `PASSWORD_VAR`
//! and the admin password through `ADMIN_PASSWORD_VAR`. Both are read
//! inside the script with `process.env`, so neither is part of argv or of
//! the script text.

use super::{AdminError, UserAdministrator};
use crate::bootstrap::Config;
use crate::credential::RoleGrant;
use tracing::{debug, info};

/// Child-process variable carrying the new user's password.
pub const PASSWORD_VAR: &str = "BOOTSTRAP_USER_PASSWORD";

/// Child-process variable carrying the admin password.
pub const ADMIN_PASSWORD_VAR: &str = "BOOTSTRAP_ADMIN_PASSWORD";

/// Render the `createUser` script for `mongosh --eval`.
///
/// Names and roles are embedded as JSON literals, which are valid
/// JavaScript expressions.
pub fn create_user_script(
    db: &str,
    username: &str,
    roles: &[RoleGrant],
) -> Result<String, serde_json::Error> {
    Ok(format!(
        "db = db.getSiblingDB({db});\n\
         db.createUser({{ user: {user}, pwd: process.env.{var}, roles: {roles} }});",
        db = serde_json::to_string(db)?,
        user = serde_json::to_string(username)?,
        var = PASSWORD_VAR,
        roles = serde_json::to_string(roles)?,
    ))
}

/// Render the statement authenticating `user` against the `admin` database.
pub fn admin_auth_script(user: &str) -> Result<String, serde_json::Error> {
    Ok(format!(
        "db.getSiblingDB(\"admin\").auth({user}, process.env.{var});",
        user = serde_json::to_string(user)?,
        var = ADMIN_PASSWORD_VAR,
    ))
}

struct AdminCredentials {
    user: String,
    password: String,
}

/// Administrator that shells out to `mongosh`.
pub struct MongoshAdministrator {
    bin: String,
    uri: String,
    admin: Option<AdminCredentials>,
}

impl MongoshAdministrator {
    pub fn new(bin: &str, uri: &str) -> Self {
        Self {
            bin: bin.to_string(),
            uri: uri.to_string(),
            admin: None,
        }
    }

    /// Authenticate against the `admin` database before creating the user.
    pub fn with_admin_credentials(mut self, user: &str, password: &str) -> Self {
        self.admin = Some(AdminCredentials {
            user: user.to_string(),
            password: password.to_string(),
        });
        self
    }

    /// Admin auth is only configured when both username and password are set.
    pub fn from_config(config: &Config) -> Self {
        let admin = Self::new(&config.mongosh_bin, &config.mongo_uri);
        match (&config.admin_user, &config.admin_password) {
            (Some(user), Some(password)) => admin.with_admin_credentials(user, password),
            _ => admin,
        }
    }

    fn script(&self, db: &str, username: &str, roles: &[RoleGrant]) -> Result<String, AdminError> {
        let create = create_user_script(db, username, roles)?;
        match &self.admin {
            Some(admin) => Ok(format!("{}\n{}", admin_auth_script(&admin.user)?, create)),
            None => Ok(create),
        }
    }

    fn args(&self, script: &str) -> Vec<String> {
        vec![
            self.uri.clone(),
            "--quiet".to_string(),
            "--norc".to_string(),
            "--eval".to_string(),
            script.to_string(),
        ]
    }
}

impl UserAdministrator for MongoshAdministrator {
    async fn create_user(
        &self,
        db: &str,
        username: &str,
        password: &str,
        roles: &[RoleGrant],
    ) -> Result<(), AdminError> {
        let script = self.script(db, username, roles)?;
        let args = self.args(&script);
        let args: Vec<&str> = args.iter().map(String::as_str).collect();

        let mut envs = vec![(PASSWORD_VAR, password)];
        if let Some(admin) = &self.admin {
            envs.push((ADMIN_PASSWORD_VAR, admin.password.as_str()));
        }

        debug!(
            database = %db,
            user = %username,
            admin_auth = self.admin.is_some(),
            "Running createUser via mongosh"
        );

        let output = common::mongosh(&self.bin, &args, &envs)
            .await
            .map_err(|e| AdminError::Spawn {
                bin: self.bin.clone(),
                reason: format!("{:#}", e),
            })?;

        if !output.success {
            return Err(AdminError::Command {
                bin: self.bin.clone(),
                code: output.code_display(),
                stderr: output.stderr,
            });
        }

        if !output.stdout.is_empty() {
            info!(output = %output.stdout, "mongosh");
        }

        Ok(())
    }
}
