//! Diagnostics output.
//!
//! Everything the harness has to say is emitted as `tracing` events:
//! summaries at `info`, failures at `error`, per-product detail at `debug`.
//! Run with `RUST_LOG=stylestore_harness=debug` to see each product.

use stylestore_core::{Product, ProductListing, Session};

use crate::error::{AuthError, ListingError};
use crate::scenario::{ScenarioReport, StepOutcome, StepReport};

/// Longest response body echoed into a log line.
const MAX_BODY_CHARS: usize = 500;

/// Log an authenticated session.
pub fn log_session(session: &Session) {
    tracing::info!(
        user = %session.display_name(),
        role = %session.role,
        via = %session.origin,
        "Authenticated"
    );
    if !session.role.is_admin() {
        tracing::warn!(role = %session.role, "Session is not an admin; admin endpoints may answer 403");
    }
}

/// Log a fatal authentication error.
pub fn log_auth_error(err: &AuthError) {
    tracing::error!(kind = %err.kind(), status = ?err.status().map(|s| s.as_u16()), "{err}");
    if let AuthError::Connection { .. } = err {
        tracing::error!("Is the API server running? Start it with: cd server && npm run dev");
    }
}

/// Log a listing failure.
pub fn log_listing_error(err: &ListingError) {
    tracing::error!(
        kind = %err.kind(),
        status = ?err.status().map(|s| s.as_u16()),
        body = %err.body().map(truncate).unwrap_or_default(),
        "Listing request failed"
    );
}

/// Log a listing summary, and each product at `debug`.
pub fn log_listing(listing: &ProductListing) {
    tracing::info!(
        total = listing.total,
        page = listing.page,
        pages = listing.pages,
        on_page = listing.len(),
        "Listing received"
    );
    if listing.is_empty() {
        tracing::info!("No products found");
    }
    for (index, product) in listing.products.iter().enumerate() {
        log_product(index + 1, product);
    }
}

/// Log one product's details at `debug`.
pub fn log_product(position: usize, product: &Product) {
    let sizes = if product.sizes.is_empty() {
        "None".to_string()
    } else {
        product.sizes.join(", ")
    };

    tracing::debug!(
        position,
        id = %product.id.short(),
        name = %product.name,
        category = %product.category,
        subcategory = product.subcategory.as_deref().unwrap_or("N/A"),
        price = %product.price,
        compare_price = %product.compare_price.map(|p| p.to_string()).unwrap_or_default(),
        stock = product.total_stock,
        sold = product.sold_count,
        available = product.available_stock(),
        rating = %product.average_rating,
        reviews = product.review_count,
        images = product.images.len(),
        sizes = %sizes,
        colors = product.colors.len(),
        active = product.is_active,
        featured = product.featured,
        "Product"
    );
}

/// Log one scenario step.
pub fn log_step(report: &StepReport) {
    let name = report.step.name;
    let query = &report.step.query;

    match &report.outcome {
        StepOutcome::Passed(listing) => {
            tracing::info!(step = name, %query, found = listing.len(), "Step passed");
            log_listing(listing);
        }
        StepOutcome::Failed(failure) => {
            tracing::error!(
                step = name,
                %query,
                kind = %failure.kind,
                status = ?failure.status.map(|s| s.as_u16()),
                body = %failure.body.as_deref().map(truncate).unwrap_or_default(),
                "Step failed"
            );
            for message in &failure.messages {
                tracing::error!(step = name, "{message}");
            }
            if let Some(listing) = &failure.listing {
                log_listing(listing);
            }
        }
    }
}

/// Log a full scenario report and its verdict.
pub fn log_report(report: &ScenarioReport) {
    log_session(&report.session);
    for step in &report.steps {
        log_step(step);
    }

    let failed = report.failures().count();
    if failed == 0 {
        tracing::info!(steps = report.steps.len(), "Scenario passed");
    } else {
        tracing::error!(steps = report.steps.len(), failed, "Scenario failed");
    }
}

/// Cut a body down to `MAX_BODY_CHARS` characters.
fn truncate(body: &str) -> String {
    let mut chars = body.chars();
    let head: String = chars.by_ref().take(MAX_BODY_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}…")
    } else {
        head
    }
}
