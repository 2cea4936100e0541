//! User administration on the database server
//!
//! - `UserAdministrator`: the capability the provisioner depends on
//! - `MongoshAdministrator`: production implementation driving `mongosh`

mod mongosh;

pub use mongosh::{
    admin_auth_script, create_user_script, MongoshAdministrator, ADMIN_PASSWORD_VAR, PASSWORD_VAR,
};

use crate::credential::RoleGrant;
use std::future::Future;
use thiserror::Error;

/// Failure reported by the database side of user creation.
#[derive(Debug, Error)]
pub enum AdminError {
    #[error("failed to run {bin}: {reason}")]
    Spawn { bin: String, reason: String },

    #[error("{bin} exited with {code}: {stderr}")]
    Command {
        bin: String,
        code: String,
        stderr: String,
    },

    #[error("failed to encode createUser arguments: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Creates user principals on a database server.
pub trait UserAdministrator {
    /// Create `username` on `db` with the given password and roles.
    ///
    /// Errors are whatever the server reports; callers must not assume
    /// a duplicate user is tolerated.
    fn create_user(
        &self,
        db: &str,
        username: &str,
        password: &str,
        roles: &[RoleGrant],
    ) -> impl Future<Output = Result<(), AdminError>> + Send;
}
