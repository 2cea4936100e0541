//! The create-user action
//!
//! Check the password, create the application user, report. Runs once,
//! never retries, and keeps no local state.

use super::config::{Config, PASSWORD_ENV};
use super::notify::Notifier;
use crate::admin::{AdminError, UserAdministrator};
use crate::credential::Credential;
use tracing::{debug, instrument};

pub const MISSING_PASSWORD_MESSAGE: &str = "ERROR: MONGO_APP_PASSWORD not set";

/// Result of a provisioning run that did not hit a server error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Created { username: String },
    /// No request was sent.
    MissingPassword,
}

impl Outcome {
    /// The operator-facing line for this outcome.
    pub fn message(&self) -> String {
        match self {
            Self::Created { username } => format!("Created application user: {}", username),
            Self::MissingPassword => MISSING_PASSWORD_MESSAGE.to_string(),
        }
    }
}

/// Provision the application user.
///
/// A missing or empty password is reported through `notifier` and returns
/// `Outcome::MissingPassword` without touching `admin`. Errors from `admin`
/// are returned unchanged and nothing is reported for them here.
#[instrument(skip_all)]
pub async fn provision<A, N>(config: &Config, admin: &A, notifier: &N) -> Result<Outcome, AdminError>
where
    A: UserAdministrator,
    N: Notifier,
{
    let Some(password) = config.app_password.as_deref().filter(|p| !p.is_empty()) else {
        debug!(var = PASSWORD_ENV, "Password missing, skipping user creation");
        let outcome = Outcome::MissingPassword;
        notifier.error(&outcome.message());
        return Ok(outcome);
    };

    let cred = Credential::application(password);
    debug!(credential = ?cred, "Creating application user");

    admin
        .create_user(&cred.database, &cred.username, &cred.password, &cred.roles)
        .await?;

    let outcome = Outcome::Created {
        username: cred.username,
    };
    notifier.info(&outcome.message());
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credential::RoleGrant;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct CreateUserRequest {
        db: String,
        username: String,
        password: String,
        roles: Vec<RoleGrant>,
    }

    /// Records requests; fails every call after the first `succeed` calls.
    struct FakeAdmin {
        requests: Mutex<Vec<CreateUserRequest>>,
        succeed: usize,
    }

    impl FakeAdmin {
        fn new() -> Self {
            Self::failing_after(usize::MAX)
        }

        fn failing_after(succeed: usize) -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                succeed,
            }
        }

        fn requests(&self) -> Vec<CreateUserRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl UserAdministrator for FakeAdmin {
        async fn create_user(
            &self,
            db: &str,
            username: &str,
            password: &str,
            roles: &[RoleGrant],
        ) -> Result<(), AdminError> {
            let mut requests = self.requests.lock().unwrap();
            requests.push(CreateUserRequest {
                db: db.to_string(),
                username: username.to_string(),
                password: password.to_string(),
                roles: roles.to_vec(),
            });
            if requests.len() > self.succeed {
                return Err(AdminError::Command {
                    bin: "fake".to_string(),
                    code: "1".to_string(),
                    stderr: format!("User \"{}@{}\" already exists", username, db),
                });
            }
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        info: Mutex<Vec<String>>,
        error: Mutex<Vec<String>>,
    }

    impl RecordingNotifier {
        fn infos(&self) -> Vec<String> {
            self.info.lock().unwrap().clone()
        }

        fn errors(&self) -> Vec<String> {
            self.error.lock().unwrap().clone()
        }
    }

    impl Notifier for RecordingNotifier {
        fn info(&self, message: &str) {
            self.info.lock().unwrap().push(message.to_string());
        }

        fn error(&self, message: &str) {
            self.error.lock().unwrap().push(message.to_string());
        }
    }

    fn config(password: Option<&str>) -> Config {
        Config {
            app_password: password.map(str::to_string),
            ..Config::default()
        }
    }

    fn expected_request(password: &str) -> CreateUserRequest {
        CreateUserRequest {
            db: "chatfleet".to_string(),
            username: "chatfleet".to_string(),
            password: password.to_string(),
            roles: vec![RoleGrant {
                role: "readWrite".to_string(),
                db: "chatfleet".to_string(),
            }],
        }
    }

    #[tokio::test]
    async fn test_missing_password_skips_creation() {
        for password in [None, Some("")] {
            let admin = FakeAdmin::new();
            let notifier = RecordingNotifier::default();

            let outcome = provision(&config(password), &admin, &notifier)
                .await
                .unwrap();

            assert_eq!(outcome, Outcome::MissingPassword);
            assert!(admin.requests().is_empty());
            assert_eq!(notifier.errors(), vec!["ERROR: MONGO_APP_PASSWORD not set"]);
            assert!(notifier.infos().is_empty());
        }
    }

    #[tokio::test]
    async fn test_creates_application_user() {
        let admin = FakeAdmin::new();
        let notifier = RecordingNotifier::default();

        let outcome = provision(&config(Some("secret123")), &admin, &notifier)
            .await
            .unwrap();

        assert_eq!(
            outcome,
            Outcome::Created {
                username: "chatfleet".to_string()
            }
        );
        assert_eq!(admin.requests(), vec![expected_request("secret123")]);
        assert_eq!(
            notifier.infos(),
            vec!["Created application user: chatfleet"]
        );
        assert!(notifier.errors().is_empty());
    }

    #[tokio::test]
    async fn test_repeat_run_sends_same_request() {
        let admin = FakeAdmin::failing_after(1);
        let notifier = RecordingNotifier::default();
        let config = config(Some("secret123"));

        let _ = provision(&config, &admin, &notifier).await;
        let _ = provision(&config, &admin, &notifier).await;

        let requests = admin.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0], requests[1]);
        assert_eq!(requests[1], expected_request("secret123"));
    }

    #[tokio::test]
    async fn test_admin_error_propagates_unchanged() {
        let admin = FakeAdmin::failing_after(0);
        let notifier = RecordingNotifier::default();

        let err = provision(&config(Some("secret123")), &admin, &notifier)
            .await
            .unwrap_err();

        match err {
            AdminError::Command { bin, code, stderr } => {
                assert_eq!(bin, "fake");
                assert_eq!(code, "1");
                assert_eq!(stderr, "User \"chatfleet@chatfleet\" already exists");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(notifier.infos().is_empty());
        assert!(notifier.errors().is_empty());
    }

    #[tokio::test]
    async fn test_identity_is_fixed_for_any_password() {
        for password in ["a", "secret123", "chatfleet", "p@ss w0rd\"'"] {
            let admin = FakeAdmin::new();
            let notifier = RecordingNotifier::default();

            provision(&config(Some(password)), &admin, &notifier)
                .await
                .unwrap();

            let requests = admin.requests();
            assert_eq!(requests.len(), 1);
            assert_eq!(requests[0].username, "chatfleet");
            assert_eq!(requests[0].db, "chatfleet");
            assert_eq!(requests[0].roles, vec![RoleGrant::read_write("chatfleet")]);
            assert_eq!(requests[0].password, password);
        }
    }
}
