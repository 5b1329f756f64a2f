//! CLI command implementations.

pub mod login;
pub mod products;
pub mod run;

use stylestore_harness::{AuthError, ConfigError, HarnessConfig, HarnessError, ListingError};
use thiserror::Error;

/// Errors that end a command with a non-zero exit status.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The HTTP client could not be created.
    #[error(transparent)]
    Harness(#[from] HarnessError),

    /// Authentication failed.
    #[error("authentication failed: {0}")]
    Auth(#[from] AuthError),

    /// A listing request failed.
    #[error("listing failed: {0}")]
    Listing(#[from] ListingError),

    /// A listing arrived but failed its checks.
    #[error("listing failed {0} check(s)")]
    Checks(usize),

    /// An anonymous listing request was served instead of rejected.
    #[error("anonymous request was served a listing instead of 401")]
    AnonymousAccepted,

    /// One or more scenario steps failed.
    #[error("{failed} of {total} step(s) failed")]
    ScenarioFailed { failed: usize, total: usize },
}

/// Load configuration from the environment and apply command-line overrides.
///
/// # Errors
///
/// Returns `ConfigError` if the environment or `--api-url` is invalid.
pub fn load_config(api_url: Option<&str>, no_register: bool) -> Result<HarnessConfig, ConfigError> {
    let mut config = HarnessConfig::from_env()?;
    if let Some(api_url) = api_url {
        config = config.with_api_url(api_url)?;
    }
    if no_register {
        config = config.with_register_on_demand(false);
    }
    tracing::debug!(
        api = %config.api_url,
        register_on_demand = config.register_on_demand,
        "Configuration loaded"
    );
    Ok(config)
}

/// Process exit status for a command result: 0 on success, 1 otherwise.
#[must_use]
pub const fn exit_code(result: &Result<(), CommandError>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(_) => 1,
    }
}
