//! Role and category enums reported by the API.

use serde::{Deserialize, Serialize};

/// Account role returned by the auth endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Regular shopper account.
    #[default]
    Customer,
    /// Store administrator; required for admin endpoints.
    Admin,
    /// Any role this harness does not know about.
    #[serde(other)]
    Unknown,
}

impl UserRole {
    /// Whether this role may call admin-only endpoints.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Customer => write!(f, "customer"),
            Self::Admin => write!(f, "admin"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Self::Customer),
            "admin" => Ok(Self::Admin),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}

/// Top-level product category.
///
/// The server restricts this to `men`, `women` and `kids`; anything else
/// is preserved verbatim so a listing never fails on a new category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum ProductCategory {
    /// Menswear.
    Men,
    /// Womenswear.
    Women,
    /// Childrenswear.
    Kids,
    /// Unrecognized category, kept as sent.
    Other(String),
    /// No category was sent.
    #[default]
    Unspecified,
}

impl ProductCategory {
    /// The wire value for this category.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Men => "men",
            Self::Women => "women",
            Self::Kids => "kids",
            Self::Other(s) => s,
            Self::Unspecified => "",
        }
    }
}

impl From<String> for ProductCategory {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "men" => Self::Men,
            "women" => Self::Women,
            "kids" => Self::Kids,
            "" => Self::Unspecified,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for ProductCategory {
    fn from(value: &str) -> Self {
        Self::from(value.to_owned())
    }
}

impl From<ProductCategory> for String {
    fn from(category: ProductCategory) -> Self {
        category.as_str().to_owned()
    }
}

impl std::fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unspecified => write!(f, "N/A"),
            other => write!(f, "{}", other.as_str()),
        }
    }
}
