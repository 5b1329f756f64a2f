//! Live tests for the admin products listing.
//!
//! These tests require a running StyleStore API server
//! (`cd server && npm run dev`) with its database seeded.
//!
//! Run with: cargo test -p stylestore-integration-tests -- --ignored

#![allow(clippy::unwrap_used)]

use stylestore_core::ProductCategory;
use stylestore_harness::scenario;
use stylestore_harness::{FailureKind, ListingQuery};
use stylestore_integration_tests::{live_client, live_session};

// ============================================================================
// Authentication
// ============================================================================

#[tokio::test]
#[ignore = "Requires running StyleStore API server"]
async fn test_session_has_token() {
    let (_client, session) = live_session().await.unwrap();
    assert!(!session.token.expose().is_empty());
}

#[tokio::test]
#[ignore = "Requires running StyleStore API server"]
async fn test_anonymous_listing_rejected() {
    let client = live_client().unwrap();
    let err = client
        .fetch_listing_anonymous(&ListingQuery::all())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), FailureKind::Unauthorized);
}

#[tokio::test]
#[ignore = "Requires running StyleStore API server"]
async fn test_raw_anonymous_request_is_401() {
    let client = live_client().unwrap();
    let url = client.config().endpoint(&["products"]);
    let resp = reqwest::get(url).await.unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::UNAUTHORIZED);
}

// ============================================================================
// Listings
// ============================================================================

#[tokio::test]
#[ignore = "Requires running StyleStore API server"]
async fn test_unfiltered_listing_is_well_formed() {
    let (client, session) = live_session().await.unwrap();
    let listing = client
        .fetch_listing(&session.token, &ListingQuery::all())
        .await
        .unwrap();

    assert!(listing.shape_violations().is_empty());
    let on_page = i64::try_from(listing.len()).unwrap();
    assert!(on_page <= listing.total);
}

#[tokio::test]
#[ignore = "Requires running StyleStore API server"]
async fn test_category_filter_respects_limit() {
    let (client, session) = live_session().await.unwrap();
    let query = ListingQuery::all().category("men").limit(5);

    let listing = client.fetch_listing(&session.token, &query).await.unwrap();

    assert!(listing.len() <= 5);
    assert!(
        listing
            .products
            .iter()
            .all(|p| p.category == ProductCategory::Men)
    );
}

#[tokio::test]
#[ignore = "Requires running StyleStore API server"]
async fn test_category_query_is_repeatable() {
    let (client, session) = live_session().await.unwrap();
    let query = ListingQuery::all().category("men").limit(5);

    let first = client.fetch_listing(&session.token, &query).await.unwrap();
    let second = client.fetch_listing(&session.token, &query).await.unwrap();

    let ids = |listing: &stylestore_core::ProductListing| {
        listing.products.iter().map(|p| p.id).collect::<Vec<_>>()
    };
    assert_eq!(ids(&first), ids(&second));
    assert_eq!(first.total, second.total);
}

#[tokio::test]
#[ignore = "Requires running StyleStore API server"]
async fn test_search_listing_is_well_formed() {
    let (client, session) = live_session().await.unwrap();
    let listing = client
        .fetch_listing(&session.token, &ListingQuery::all().search("shirt"))
        .await
        .unwrap();
    assert!(listing.shape_violations().is_empty());
}

#[tokio::test]
#[ignore = "Requires running StyleStore API server"]
async fn test_full_scenario() {
    let client = live_client().unwrap();
    let report = scenario::run(&client).await.unwrap();

    let failures: Vec<_> = report
        .failures()
        .map(|step| step.step.name)
        .collect();
    assert!(failures.is_empty(), "failed steps: {failures:?}");
}
