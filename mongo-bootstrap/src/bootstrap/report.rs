//! Run status for the bootstrap binary
//!
//! Missing password exits 0 unless strict mode is on; a server error
//! always exits 1.

use super::provision::Outcome;
use crate::admin::AdminError;

/// Telemetry text for a missing password. Kept distinct from the
/// operator diagnostic so that line is only printed once.
pub const MISSING_PASSWORD_TELEMETRY: &str = "MONGO_APP_PASSWORD missing";

/// Why a run did not create the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub phase: &'static str,
    pub error: String,
}

pub fn failure(result: &Result<Outcome, AdminError>) -> Option<Failure> {
    match result {
        Ok(Outcome::Created { .. }) => None,
        Ok(Outcome::MissingPassword) => Some(Failure {
            phase: "read_config",
            error: MISSING_PASSWORD_TELEMETRY.to_string(),
        }),
        Err(e) => Some(Failure {
            phase: "create_user",
            error: e.to_string(),
        }),
    }
}

pub fn exit_code(result: &Result<Outcome, AdminError>, strict: bool) -> i32 {
    match result {
        Ok(Outcome::Created { .. }) => 0,
        Ok(Outcome::MissingPassword) if strict => 1,
        Ok(Outcome::MissingPassword) => 0,
        Err(_) => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn created() -> Result<Outcome, AdminError> {
        Ok(Outcome::Created {
            username: "chatfleet".to_string(),
        })
    }

    fn admin_error() -> Result<Outcome, AdminError> {
        Err(AdminError::Command {
            bin: "mongosh".to_string(),
            code: "1".to_string(),
            stderr: "already exists".to_string(),
        })
    }

    #[test]
    fn test_created_exits_zero() {
        assert_eq!(exit_code(&created(), false), 0);
        assert_eq!(exit_code(&created(), true), 0);
        assert_eq!(failure(&created()), None);
    }

    #[test]
    fn test_missing_password_soft_by_default() {
        let result = Ok(Outcome::MissingPassword);
        assert_eq!(exit_code(&result, false), 0);
        assert_eq!(exit_code(&result, true), 1);
    }

    #[test]
    fn test_missing_password_failure_is_not_the_operator_line() {
        let failure = failure(&Ok(Outcome::MissingPassword)).unwrap();
        assert_eq!(failure.phase, "read_config");
        assert_eq!(failure.error, "MONGO_APP_PASSWORD missing");
        assert_ne!(failure.error, Outcome::MissingPassword.message());
    }

    #[test]
    fn test_admin_error_exits_one() {
        assert_eq!(exit_code(&admin_error(), false), 1);
        assert_eq!(exit_code(&admin_error(), true), 1);

        let failure = failure(&admin_error()).unwrap();
        assert_eq!(failure.phase, "create_user");
        assert_eq!(failure.error, "mongosh exited with 1: already exists");
    }
}
