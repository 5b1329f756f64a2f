//! Product listing requests.

use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use stylestore_core::{BearerToken, ProductListing};
use tracing::instrument;
use url::Url;

use crate::error::ListingError;

/// Query parameters for `GET /products`.
///
/// Parameters are serialized in a fixed order (`category`, `limit`,
/// `search`, `page`) so identical queries produce identical URLs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingQuery {
    /// Category filter, e.g. `men`.
    pub category: Option<String>,
    /// Page size.
    pub limit: Option<u32>,
    /// Free-text search term.
    pub search: Option<String>,
    /// 1-based page number.
    pub page: Option<u32>,
}

impl ListingQuery {
    /// An unfiltered query.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Filter by category.
    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Limit the page size.
    #[must_use]
    pub const fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Search by term.
    #[must_use]
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Request a specific page.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Key/value pairs in wire order.
    #[must_use]
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(4);
        if let Some(category) = &self.category {
            pairs.push(("category", category.clone()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        pairs
    }

    /// Apply these parameters to a URL.
    #[must_use]
    pub fn apply(&self, mut url: Url) -> Url {
        let pairs = self.pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        url
    }
}

/// `category=men&limit=5` style rendering; empty for an unfiltered query.
impl std::fmt::Display for ListingQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rendered = self
            .pairs()
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("&");
        f.write_str(&rendered)
    }
}

/// Fetch one listing page.
///
/// Sends the bearer header when a token is given. A 200 body is parsed and
/// normalized; any other status becomes a [`ListingError`] carrying the
/// status and raw body.
///
/// # Errors
///
/// Returns `ListingError::Unauthorized` (401), `ListingError::Forbidden`
/// (403), `ListingError::UnexpectedStatus` (other non-200),
/// `ListingError::Connection` on network failure, and `ListingError::Parse`
/// if a 200 body is not a listing.
#[instrument(
    skip(client, url, token),
    fields(endpoint = %url, query = %query, authenticated = token.is_some())
)]
pub async fn fetch(
    client: &reqwest::Client,
    url: Url,
    token: Option<&BearerToken>,
    query: &ListingQuery,
) -> Result<ProductListing, ListingError> {
    let url = query.apply(url);
    let url_text = url.to_string();
    let connection = |source| ListingError::Connection {
        url: url_text.clone(),
        source,
    };

    let mut request = client.get(url).header(CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        request = request.header(AUTHORIZATION, token.header_value());
    }

    let response = request.send().await.map_err(connection)?;
    let status = response.status();
    let body = response.text().await.map_err(connection)?;
    tracing::debug!(%status, bytes = body.len(), "Listing response received");

    if status != StatusCode::OK {
        return Err(ListingError::from_status(status, body));
    }

    ProductListing::from_json(&body).map_err(|source| ListingError::Parse { body, source })
}
