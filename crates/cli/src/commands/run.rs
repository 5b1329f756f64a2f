//! The `run` command: the full admin products scenario.

use stylestore_harness::{ApiClient, HarnessConfig, report, scenario};

use super::CommandError;

/// Authenticate, then run each listing step and report the results.
///
/// # Errors
///
/// Returns `CommandError::Auth` if no session could be obtained, and
/// `CommandError::ScenarioFailed` if any step failed.
pub async fn execute(config: HarnessConfig) -> Result<(), CommandError> {
    let client = ApiClient::new(config)?;
    tracing::info!(api = %client.config().api_url, "Running admin products scenario");

    let results = match scenario::run(&client).await {
        Ok(results) => results,
        Err(err) => {
            report::log_auth_error(&err);
            return Err(err.into());
        }
    };

    report::log_report(&results);

    let failed = results.failures().count();
    if failed == 0 {
        Ok(())
    } else {
        Err(CommandError::ScenarioFailed {
            failed,
            total: results.steps.len(),
        })
    }
}
