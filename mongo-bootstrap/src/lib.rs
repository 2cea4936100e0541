//! MongoDB application user bootstrap
//!
//! Provisions the `chatfleet` application user with a `readWrite` grant on
//! the `chatfleet` database. The database is reached through the
//! `UserAdministrator` capability so the provisioning logic can be tested
//! without a server.

pub mod admin;
pub mod bootstrap;
pub mod credential;

pub use admin::{AdminError, MongoshAdministrator, UserAdministrator};
pub use bootstrap::{exit_code, failure, provision, Config, Notifier, Outcome, TracingNotifier};
pub use credential::{Credential, RoleGrant, APP_DB, APP_USER};
