//! The fixed admin-products scenario.
//!
//! 1. Authenticate.
//! 2. Fetch the unfiltered listing and check its shape.
//! 3. Fetch `category=men&limit=5` and check the count and categories.
//! 4. Fetch `search=shirt` and report the count.
//!
//! Steps run strictly in order. An authentication failure ends the run;
//! a listing failure is recorded against its step and the next step runs.

use reqwest::StatusCode;
use stylestore_core::{ProductCategory, ProductListing, Session};

use crate::client::{ApiClient, ListingQuery};
use crate::error::{AuthError, FailureKind, ListingError};

/// A listing request plus the checks applied to its response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingStep {
    /// Short label for reports.
    pub name: &'static str,
    /// Query to send.
    pub query: ListingQuery,
}

impl ListingStep {
    /// Create a step.
    #[must_use]
    pub const fn new(name: &'static str, query: ListingQuery) -> Self {
        Self { name, query }
    }

    /// Check a listing against the pagination invariants and the query.
    ///
    /// Returns a message per failed check. The page must not exceed the
    /// requested `limit`, and every product must be in the requested
    /// `category`.
    #[must_use]
    pub fn check(&self, listing: &ProductListing) -> Vec<String> {
        let mut failures: Vec<String> = listing
            .shape_violations()
            .iter()
            .map(ToString::to_string)
            .collect();

        if let Some(limit) = self.query.limit {
            let limit = usize::try_from(limit).unwrap_or(usize::MAX);
            if listing.len() > limit {
                failures.push(format!(
                    "expected at most {limit} products, got {}",
                    listing.len()
                ));
            }
        }

        if let Some(category) = &self.query.category {
            let expected = ProductCategory::from(category.as_str());
            let strays = listing
                .products
                .iter()
                .filter(|product| product.category != expected)
                .count();
            if strays > 0 {
                failures.push(format!("{strays} product(s) outside category '{category}'"));
            }
        }

        failures
    }
}

/// The listing steps run after authentication, in order.
#[must_use]
pub fn default_steps() -> Vec<ListingStep> {
    vec![
        ListingStep::new("all products", ListingQuery::all()),
        ListingStep::new(
            "category filter",
            ListingQuery::all().category("men").limit(5),
        ),
        ListingStep::new("search", ListingQuery::all().search("shirt")),
    ]
}

/// Why a step failed.
#[derive(Debug)]
pub struct StepFailure {
    /// Classification.
    pub kind: FailureKind,
    /// HTTP status, if a response arrived.
    pub status: Option<StatusCode>,
    /// Raw response body for request failures.
    pub body: Option<String>,
    /// Human-readable detail, one entry per problem.
    pub messages: Vec<String>,
    /// The listing, when it parsed but failed a check.
    pub listing: Option<ProductListing>,
}

impl StepFailure {
    fn from_listing_error(err: &ListingError) -> Self {
        Self {
            kind: err.kind(),
            status: err.status(),
            body: err.body().map(str::to_owned),
            messages: vec![err.to_string()],
            listing: None,
        }
    }

    fn from_checks(listing: ProductListing, messages: Vec<String>) -> Self {
        Self {
            kind: FailureKind::Assertion,
            status: Some(StatusCode::OK),
            body: None,
            messages,
            listing: Some(listing),
        }
    }
}

/// Outcome of one listing step.
#[derive(Debug)]
pub enum StepOutcome {
    /// 200, parsed, every check passed.
    Passed(ProductListing),
    /// Request or check failure.
    Failed(StepFailure),
}

/// One step's record in the report.
#[derive(Debug)]
pub struct StepReport {
    /// The step that ran.
    pub step: ListingStep,
    /// What happened.
    pub outcome: StepOutcome,
}

impl StepReport {
    /// Whether the step passed.
    #[must_use]
    pub const fn passed(&self) -> bool {
        matches!(self.outcome, StepOutcome::Passed(_))
    }

    /// The listing received, whether or not the checks passed.
    #[must_use]
    pub const fn listing(&self) -> Option<&ProductListing> {
        match &self.outcome {
            StepOutcome::Passed(listing) => Some(listing),
            StepOutcome::Failed(failure) => failure.listing.as_ref(),
        }
    }
}

/// Result of a completed scenario run.
#[derive(Debug)]
pub struct ScenarioReport {
    /// Session obtained in the authentication step.
    pub session: Session,
    /// One entry per listing step, in run order.
    pub steps: Vec<StepReport>,
}

impl ScenarioReport {
    /// True when every step passed.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.steps.iter().all(StepReport::passed)
    }

    /// Steps that failed.
    pub fn failures(&self) -> impl Iterator<Item = &StepReport> {
        self.steps.iter().filter(|step| !step.passed())
    }
}

/// Run a single listing step.
pub async fn run_step(client: &ApiClient, session: &Session, step: ListingStep) -> StepReport {
    tracing::info!(step = step.name, query = %step.query, "Fetching listing");

    let outcome = match client.fetch_listing(&session.token, &step.query).await {
        Ok(listing) => {
            let messages = step.check(&listing);
            if messages.is_empty() {
                StepOutcome::Passed(listing)
            } else {
                StepOutcome::Failed(StepFailure::from_checks(listing, messages))
            }
        }
        Err(err) => StepOutcome::Failed(StepFailure::from_listing_error(&err)),
    };

    StepReport { step, outcome }
}

/// Run the scenario with the default steps.
///
/// # Errors
///
/// Returns the `AuthError` if authentication fails; no listing step runs.
pub async fn run(client: &ApiClient) -> Result<ScenarioReport, AuthError> {
    run_with_steps(client, default_steps()).await
}

/// Run the scenario with custom listing steps.
///
/// # Errors
///
/// Returns the `AuthError` if authentication fails; no listing step runs.
pub async fn run_with_steps(
    client: &ApiClient,
    steps: Vec<ListingStep>,
) -> Result<ScenarioReport, AuthError> {
    let session = client.authenticate(&client.config().login).await?;

    let mut reports = Vec::with_capacity(steps.len());
    for step in steps {
        reports.push(run_step(client, &session, step).await);
    }

    Ok(ScenarioReport {
        session,
        steps: reports,
    })
}
