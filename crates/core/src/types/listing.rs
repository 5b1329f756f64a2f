//! Product listing responses.
//!
//! `GET /products` answers either with a bare JSON array of products or with
//! a paginated object. Both are ingested as [`ListingBody`] and normalized
//! immediately into a [`ProductListing`]; nothing downstream looks at the
//! raw shape.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::Product;
use super::lenient::int_from_value;

/// A listing body exactly as the server sent it.
///
/// Records and pagination numbers are read leniently: any JSON array or
/// object is a listing, whatever its fields hold.
#[derive(Debug, Clone)]
pub enum ListingBody {
    /// The full collection as an array.
    Bare(Vec<Product>),
    /// One page plus pagination metadata, any of which may be missing.
    Paginated {
        products: Vec<Product>,
        total: Option<i64>,
        page: Option<i64>,
        pages: Option<i64>,
    },
}

impl<'de> Deserialize<'de> for ListingBody {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Array(records) => Ok(Self::Bare(products_from(records))),
            Value::Object(mut fields) => {
                let products = match fields.remove("products") {
                    Some(Value::Array(records)) => products_from(records),
                    _ => Vec::new(),
                };
                let number = |key: &str| fields.get(key).and_then(int_from_value);
                Ok(Self::Paginated {
                    products,
                    total: number("total"),
                    page: number("page"),
                    pages: number("pages"),
                })
            }
            other => Err(D::Error::custom(format!(
                "expected a product array or a paginated object, got {}",
                json_kind(&other)
            ))),
        }
    }
}

fn products_from(records: Vec<Value>) -> Vec<Product> {
    records.into_iter().map(Product::from_value).collect()
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// A normalized page of products.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductListing {
    /// Products on this page.
    pub products: Vec<Product>,
    /// Total matching products across all pages.
    pub total: i64,
    /// 1-based page number.
    pub page: i64,
    /// Number of pages.
    pub pages: i64,
}

impl ProductListing {
    /// Parse and normalize a listing body.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not JSON, or is JSON that is neither
    /// an array nor an object.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<ListingBody>(text).map(Self::from)
    }

    /// Number of products on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether this page has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Check the pagination invariants.
    ///
    /// Returns every violated invariant; an empty vector means the listing
    /// is well-formed.
    #[must_use]
    pub fn shape_violations(&self) -> Vec<ShapeViolation> {
        let mut violations = Vec::new();
        let count = count_as_i64(self.products.len());

        if count > self.total {
            violations.push(ShapeViolation::ProductsExceedTotal {
                count,
                total: self.total,
            });
        }
        if self.page < 1 {
            violations.push(ShapeViolation::PageBelowOne(self.page));
        }
        if self.pages < 1 {
            violations.push(ShapeViolation::PagesBelowOne(self.pages));
        }
        if !self.products.is_empty() && self.page >= 1 && self.pages >= 1 && self.page > self.pages
        {
            violations.push(ShapeViolation::PageBeyondPages {
                page: self.page,
                pages: self.pages,
            });
        }

        violations
    }
}

impl From<ListingBody> for ProductListing {
    fn from(body: ListingBody) -> Self {
        match body {
            ListingBody::Bare(products) => Self {
                total: count_as_i64(products.len()),
                page: 1,
                pages: 1,
                products,
            },
            ListingBody::Paginated {
                products,
                total,
                page,
                pages,
            } => Self {
                total: total.unwrap_or_else(|| count_as_i64(products.len())),
                page: page.unwrap_or(1),
                pages: pages.unwrap_or(1),
                products,
            },
        }
    }
}

fn count_as_i64(len: usize) -> i64 {
    i64::try_from(len).unwrap_or(i64::MAX)
}

/// A broken pagination invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ShapeViolation {
    /// More products on the page than the reported total.
    #[error("page holds {count} products but total is {total}")]
    ProductsExceedTotal {
        /// Products on the page.
        count: i64,
        /// Reported total.
        total: i64,
    },
    /// `page` is zero or negative.
    #[error("page must be >= 1 (got {0})")]
    PageBelowOne(i64),
    /// `pages` is zero or negative.
    #[error("pages must be >= 1 (got {0})")]
    PagesBelowOne(i64),
    /// A non-empty page numbered past the last page.
    #[error("page {page} is beyond the last page {pages}")]
    PageBeyondPages {
        /// Reported page.
        page: i64,
        /// Reported page count.
        pages: i64,
    },
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_array_normalizes() {
        let listing =
            ProductListing::from_json(r#"[{"name": "A"}, {"name": "B"}, {"name": "C"}]"#).unwrap();
        assert_eq!(listing.len(), 3);
        assert_eq!(listing.total, 3);
        assert_eq!(listing.page, 1);
        assert_eq!(listing.pages, 1);
        assert!(listing.shape_violations().is_empty());
    }

    #[test]
    fn test_empty_bare_array() {
        let listing = ProductListing::from_json("[]").unwrap();
        assert!(listing.is_empty());
        assert_eq!(listing.total, 0);
        assert_eq!((listing.page, listing.pages), (1, 1));
    }

    #[test]
    fn test_paginated_object() {
        let listing = ProductListing::from_json(
            r#"{"products": [{"name": "A"}], "total": 42, "page": 3, "pages": 9}"#,
        )
        .unwrap();
        assert_eq!(listing.len(), 1);
        assert_eq!(
            (listing.total, listing.page, listing.pages),
            (42, 3, 9)
        );
        assert!(listing.shape_violations().is_empty());
    }

    #[test]
    fn test_object_missing_metadata_defaults() {
        let listing =
            ProductListing::from_json(r#"{"products": [{"name": "A"}, {"name": "B"}]}"#).unwrap();
        assert_eq!(listing.total, 2);
        assert_eq!(listing.page, 1);
        assert_eq!(listing.pages, 1);
    }

    #[test]
    fn test_object_without_products() {
        let listing = ProductListing::from_json(r#"{"message": "ok"}"#).unwrap();
        assert!(listing.is_empty());
        assert_eq!(listing.total, 0);

        let listing = ProductListing::from_json(r#"{"products": null, "total": 0}"#).unwrap();
        assert!(listing.is_empty());
    }

    #[test]
    fn test_string_page_numbers() {
        let listing = ProductListing::from_json(
            r#"{"products": [], "total": "10", "page": "2", "pages": "5"}"#,
        )
        .unwrap();
        assert_eq!((listing.total, listing.page, listing.pages), (10, 2, 5));
    }

    #[test]
    fn test_mistyped_records_still_count() {
        let listing =
            ProductListing::from_json(r#"[{"name": "A", "totalStock": "5"}, {"name": "B"}]"#)
                .unwrap();
        assert_eq!(listing.len(), 2);
        assert_eq!(listing.total, 2);
        assert_eq!(listing.products[0].total_stock, 5);

        let listing = ProductListing::from_json(
            r#"{"products": [{"sizes": [{"size": "M", "stock": 3}]}, "stray"], "total": 2}"#,
        )
        .unwrap();
        assert_eq!(listing.len(), 2);
        assert_eq!(listing.products[0].sizes, vec!["M".to_string()]);
    }

    #[test]
    fn test_float_and_odd_page_numbers() {
        let listing = ProductListing::from_json(
            r#"{"products": [{}], "total": 1.0, "page": "1", "pages": 1.0}"#,
        )
        .unwrap();
        assert_eq!((listing.total, listing.page, listing.pages), (1, 1, 1));
        assert!(listing.shape_violations().is_empty());

        let listing = ProductListing::from_json(
            r#"{"products": [{}, {}], "total": "many", "page": null, "pages": [3]}"#,
        )
        .unwrap();
        assert_eq!((listing.total, listing.page, listing.pages), (2, 1, 1));

        let listing = ProductListing::from_json(r#"{"products": "none", "total": 0}"#).unwrap();
        assert!(listing.is_empty());
    }

    #[test]
    fn test_not_a_listing_names_the_shape() {
        let err = ProductListing::from_json("42").unwrap_err();
        assert!(err.to_string().contains("got a number"));
    }

    #[test]
    fn test_not_a_listing() {
        assert!(ProductListing::from_json("42").is_err());
        assert!(ProductListing::from_json("\"products\"").is_err());
        assert!(ProductListing::from_json("<html>").is_err());
    }

    #[test]
    fn test_shape_violations() {
        let listing = ProductListing::from_json(
            r#"{"products": [{"name": "A"}, {"name": "B"}], "total": 1, "page": 0, "pages": 0}"#,
        )
        .unwrap();
        let violations = listing.shape_violations();
        assert!(violations.contains(&ShapeViolation::ProductsExceedTotal { count: 2, total: 1 }));
        assert!(violations.contains(&ShapeViolation::PageBelowOne(0)));
        assert!(violations.contains(&ShapeViolation::PagesBelowOne(0)));
    }

    #[test]
    fn test_page_beyond_pages() {
        let listing = ProductListing::from_json(
            r#"{"products": [{"name": "A"}], "total": 10, "page": 4, "pages": 2}"#,
        )
        .unwrap();
        assert_eq!(
            listing.shape_violations(),
            vec![ShapeViolation::PageBeyondPages { page: 4, pages: 2 }]
        );
    }
}
