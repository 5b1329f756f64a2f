//! Integration tests for the StyleStore harness against a live API server.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the API server (from the StyleStore repository)
//! cd server && npm run dev
//!
//! # Run the ignored live tests
//! cargo test -p stylestore-integration-tests -- --ignored
//! ```
//!
//! The server is located with the same environment variables the harness
//! uses (`STYLESTORE_API_URL`, `STYLESTORE_LOGIN_EMAIL`, ...).

use stylestore_core::Session;
use stylestore_harness::{ApiClient, HarnessConfig, HarnessError};

/// Client for the server named by the environment.
///
/// # Errors
///
/// Returns `HarnessError` if the configuration is invalid or the HTTP client
/// cannot be built.
pub fn live_client() -> Result<ApiClient, HarnessError> {
    let config = HarnessConfig::from_env()?;
    ApiClient::new(config)
}

/// Client plus an authenticated session.
///
/// # Errors
///
/// Returns `HarnessError::Auth` if neither login nor registration succeeds.
pub async fn live_session() -> Result<(ApiClient, Session), HarnessError> {
    let client = live_client()?;
    let session = client.authenticate(&client.config().login).await?;
    Ok((client, session))
}
