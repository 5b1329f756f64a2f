//! The `login` command.

use stylestore_harness::{ApiClient, HarnessConfig, report};

use super::CommandError;

/// Authenticate with the configured account and log the session.
///
/// # Errors
///
/// Returns `CommandError::Auth` if no session could be obtained.
pub async fn check(config: HarnessConfig) -> Result<(), CommandError> {
    let client = ApiClient::new(config)?;

    match client.authenticate(&client.config().login).await {
        Ok(session) => {
            report::log_session(&session);
            Ok(())
        }
        Err(err) => {
            report::log_auth_error(&err);
            Err(err.into())
        }
    }
}
