//! StyleStore API client.
//!
//! Wraps a single `reqwest::Client` and the harness configuration. Requests
//! are issued one at a time; every call is awaited to completion before the
//! caller moves on.
//!
//! # Authentication
//!
//! [`ApiClient::authenticate`] logs in and, when the server rejects the
//! credentials and registration-on-demand is enabled, registers the
//! configured admin profile instead. The resulting [`Session`] is owned by
//! the caller and passed back in for each listing request.

pub mod auth;
pub mod products;

pub use products::ListingQuery;

use stylestore_core::{BearerToken, ProductListing, Session};
use tracing::instrument;

use crate::config::{HarnessConfig, LoginCredentials};
use crate::error::{AuthError, HarnessError, ListingError};
use auth::LoginOutcome;

/// User agent sent with every request.
const USER_AGENT: &str = concat!("stylestore-harness/", env!("CARGO_PKG_VERSION"));

/// StyleStore API client.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    config: HarnessConfig,
}

impl ApiClient {
    /// Create a client for the configured API.
    ///
    /// # Errors
    ///
    /// Returns `HarnessError::Client` if the HTTP client cannot be built.
    pub fn new(config: HarnessConfig) -> Result<Self, HarnessError> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client, config })
    }

    /// The configuration this client was built with.
    #[must_use]
    pub const fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Obtain a session for the given credentials.
    ///
    /// On a 401 login, registers the configured admin profile if
    /// registration-on-demand is enabled.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if login is rejected and
    /// registration-on-demand is disabled; otherwise any error from the
    /// login or registration exchange.
    #[instrument(skip(self, credentials), fields(api = %self.config.api_url))]
    pub async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Session, AuthError> {
        let login_url = self.config.endpoint(&["auth", "login"]);

        match auth::login(&self.client, login_url, credentials).await? {
            LoginOutcome::Authenticated(session) => {
                tracing::info!(user = %session.display_name(), role = %session.role, "Logged in");
                Ok(session)
            }
            LoginOutcome::Rejected { body } if self.config.register_on_demand => {
                tracing::warn!(
                    email = %credentials.email,
                    admin = %self.config.admin.email,
                    "Login rejected, registering fallback admin"
                );
                tracing::debug!(%body, "Login rejection body");

                let register_url = self.config.endpoint(&["auth", "register"]);
                let session = auth::register(&self.client, register_url, &self.config.admin).await?;
                tracing::info!(
                    user = %session.display_name(),
                    role = %session.role,
                    "Registered and logged in"
                );
                Ok(session)
            }
            LoginOutcome::Rejected { body } => Err(AuthError::InvalidCredentials {
                email: credentials.email.to_string(),
                body,
            }),
        }
    }

    /// Fetch a listing page with the session's bearer token.
    ///
    /// # Errors
    ///
    /// See [`products::fetch`].
    pub async fn fetch_listing(
        &self,
        token: &BearerToken,
        query: &ListingQuery,
    ) -> Result<ProductListing, ListingError> {
        products::fetch(&self.client, self.products_url(), Some(token), query).await
    }

    /// Fetch a listing page without an `Authorization` header.
    ///
    /// Used to check that the endpoint rejects anonymous callers.
    ///
    /// # Errors
    ///
    /// See [`products::fetch`].
    pub async fn fetch_listing_anonymous(
        &self,
        query: &ListingQuery,
    ) -> Result<ProductListing, ListingError> {
        products::fetch(&self.client, self.products_url(), None, query).await
    }

    fn products_url(&self) -> url::Url {
        self.config.endpoint(&["products"])
    }
}
