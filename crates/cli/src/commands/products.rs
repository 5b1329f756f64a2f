//! The `products` command: one ad-hoc listing request.

use stylestore_harness::{ApiClient, HarnessConfig, ListingError, ListingQuery, ListingStep, report};

use super::CommandError;

/// Fetch a listing page and check it against the query.
///
/// With `anonymous`, no login happens and no bearer token is sent. The
/// server must answer 401; that is the passing outcome.
///
/// # Errors
///
/// Returns `CommandError::Auth` if authentication fails,
/// `CommandError::Listing` if the request fails, `CommandError::Checks`
/// if the listing violates the pagination contract or the query filters,
/// and `CommandError::AnonymousAccepted` if an anonymous request was served.
pub async fn fetch(
    config: HarnessConfig,
    query: ListingQuery,
    anonymous: bool,
) -> Result<(), CommandError> {
    let client = ApiClient::new(config)?;

    if anonymous {
        return expect_anonymous_rejected(&client, &query).await;
    }

    let session = match client.authenticate(&client.config().login).await {
        Ok(session) => session,
        Err(err) => {
            report::log_auth_error(&err);
            return Err(err.into());
        }
    };
    report::log_session(&session);

    let listing = match client.fetch_listing(&session.token, &query).await {
        Ok(listing) => listing,
        Err(err) => {
            report::log_listing_error(&err);
            return Err(err.into());
        }
    };

    report::log_listing(&listing);

    let failures = ListingStep::new("products", query).check(&listing);
    for failure in &failures {
        tracing::error!("{failure}");
    }
    if failures.is_empty() {
        Ok(())
    } else {
        Err(CommandError::Checks(failures.len()))
    }
}

async fn expect_anonymous_rejected(
    client: &ApiClient,
    query: &ListingQuery,
) -> Result<(), CommandError> {
    match client.fetch_listing_anonymous(query).await {
        Err(ListingError::Unauthorized { .. }) => {
            tracing::info!(%query, "Anonymous request rejected with 401");
            Ok(())
        }
        Err(err) => {
            report::log_listing_error(&err);
            Err(err.into())
        }
        Ok(listing) => {
            tracing::error!(
                %query,
                on_page = listing.len(),
                "Anonymous request was served a listing"
            );
            Err(CommandError::AnonymousAccepted)
        }
    }
}
