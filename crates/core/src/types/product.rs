//! Product records as returned by `GET /products`.
//!
//! The server owns these records; the harness only reads them. Every field
//! is optional on the wire, and absent or `null` values fall back to
//! empty/zero so that a sparse record never fails the whole listing.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::lenient::{
    default_on_error, empty_string_as_none, label_list, lenient_bool, lenient_int, lenient_list,
    lenient_string, none_on_error, optional_int, uuid_or_nil,
};
use super::{Price, ProductCategory, ProductId};

/// A product in a listing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Product {
    #[serde(deserialize_with = "uuid_or_nil")]
    pub id: ProductId,
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "empty_string_as_none")]
    pub description: Option<String>,
    #[serde(deserialize_with = "default_on_error")]
    pub category: ProductCategory,
    #[serde(deserialize_with = "empty_string_as_none")]
    pub subcategory: Option<String>,
    #[serde(deserialize_with = "default_on_error")]
    pub price: Price,
    /// Original price when the product is on sale.
    #[serde(deserialize_with = "none_on_error")]
    pub compare_price: Option<Price>,
    #[serde(deserialize_with = "empty_string_as_none")]
    pub brand: Option<String>,
    #[serde(deserialize_with = "label_list")]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "lenient_int")]
    pub total_stock: i64,
    #[serde(deserialize_with = "lenient_int")]
    pub sold_count: i64,
    /// Server-computed `totalStock - soldCount`; older servers omit it.
    #[serde(deserialize_with = "optional_int")]
    pub remaining_stock: Option<i64>,
    #[serde(deserialize_with = "default_on_error")]
    pub average_rating: Decimal,
    #[serde(deserialize_with = "lenient_int")]
    pub review_count: i64,
    #[serde(deserialize_with = "lenient_list")]
    pub images: Vec<ProductImage>,
    /// Size labels; object entries (`{"size": "M", "stock": 3}`) keep the label.
    #[serde(deserialize_with = "label_list")]
    pub sizes: Vec<String>,
    #[serde(deserialize_with = "lenient_list")]
    pub colors: Vec<ProductColor>,
    #[serde(deserialize_with = "lenient_bool")]
    pub is_active: bool,
    #[serde(deserialize_with = "lenient_bool")]
    pub featured: bool,
    #[serde(deserialize_with = "none_on_error")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "none_on_error")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Read one listing record.
    ///
    /// Fields are coerced individually; a record that is not an object at
    /// all becomes an empty product so it still counts towards the page.
    #[must_use]
    pub fn from_value(value: serde_json::Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }

    /// Units left to sell.
    ///
    /// Prefers the server's `remainingStock`, else `totalStock - soldCount`
    /// clamped at zero.
    #[must_use]
    pub fn available_stock(&self) -> i64 {
        self.remaining_stock
            .unwrap_or_else(|| self.total_stock.saturating_sub(self.sold_count))
            .max(0)
    }

    /// Whether a compare-at price above the current price is set.
    #[must_use]
    pub fn is_on_sale(&self) -> bool {
        self.compare_price
            .is_some_and(|compare| !compare.is_zero() && compare > self.price)
    }
}

/// A product image: either a bare URL or an uploaded asset record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductImage {
    /// Plain URL string.
    Url(String),
    /// Uploaded asset (e.g. from the CDN), carrying at least a URL.
    Asset {
        #[serde(default)]
        url: String,
        #[serde(default, rename = "publicId")]
        public_id: Option<String>,
        #[serde(default)]
        alt: Option<String>,
    },
}

impl ProductImage {
    /// The image URL.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Url(url) | Self::Asset { url, .. } => url,
        }
    }
}

/// A color option: either a name or a swatch with a hex code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductColor {
    /// Color name only.
    Name(String),
    /// Named swatch.
    Swatch {
        #[serde(default)]
        name: String,
        #[serde(default, alias = "code")]
        hex: Option<String>,
    },
}

impl ProductColor {
    /// The color's display name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Name(name) | Self::Swatch { name, .. } => name,
        }
    }
}
