//! Bootstrap configuration from environment variables

use common::{process_env, ConfigExt};
use std::fmt;

/// Variable holding the application user's password.
pub const PASSWORD_ENV: &str = "MONGO_APP_PASSWORD";

pub const DEFAULT_MONGO_URI: &str = "mongodb://127.0.0.1:27017";

/// Configuration for the bootstrap binary.
///
/// Only `app_password` feeds the provisioning decision; the rest
/// describes how to reach the server.
#[derive(Clone, Default)]
pub struct Config {
    /// `None` when unset or empty.
    pub app_password: Option<String>,
    pub mongo_uri: String,
    pub admin_user: Option<String>,
    pub admin_password: Option<String>,
    pub mongosh_bin: String,
    /// Exit non-zero when the password is missing.
    pub strict: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(process_env)
    }

    /// Load configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            app_password: lookup.env_nonempty(PASSWORD_ENV),
            mongo_uri: lookup.env_or("MONGO_URI", DEFAULT_MONGO_URI),
            admin_user: lookup.env_nonempty("MONGO_INITDB_ROOT_USERNAME"),
            admin_password: lookup.env_nonempty("MONGO_INITDB_ROOT_PASSWORD"),
            mongosh_bin: lookup.env_or("MONGOSH_BIN", "mongosh"),
            strict: lookup.env_bool("MONGO_BOOTSTRAP_STRICT", false),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("app_password_set", &self.app_password.is_some())
            .field("admin_user", &self.admin_user)
            .field("admin_password_set", &self.admin_password.is_some())
            .field("mongosh_bin", &self.mongosh_bin)
            .field("strict", &self.strict)
            .finish_non_exhaustive()
    }
}
