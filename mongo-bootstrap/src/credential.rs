//! Application credential model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Username of the application principal.
pub const APP_USER: &str = "chatfleet";

/// Database the application principal is scoped to.
pub const APP_DB: &str = "chatfleet";

/// Built-in MongoDB role granting read and write on one database.
pub const READ_WRITE: &str = "readWrite";

/// A role bound to a database, serialized as `{ role, db }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleGrant {
    pub role: String,
    pub db: String,
}

impl RoleGrant {
    pub fn read_write(db: &str) -> Self {
        Self {
            role: READ_WRITE.to_string(),
            db: db.to_string(),
        }
    }
}

/// Credential to be created on the server.
///
/// Identity is `(username, database)`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub username: String,
    pub password: String,
    pub database: String,
    pub roles: Vec<RoleGrant>,
}

impl Credential {
    /// The application credential: fixed user and database, password from config.
    pub fn application(password: &str) -> Self {
        Self {
            username: APP_USER.to_string(),
            password: password.to_string(),
            database: APP_DB.to_string(),
            roles: vec![RoleGrant::read_write(APP_DB)],
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .field("roles", &self.roles)
            .finish()
    }
}
