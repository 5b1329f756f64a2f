//! Core types for StyleStore.
//!
//! This module provides type-safe wrappers for the concepts the harness
//! exchanges with the API.

pub mod credential;
pub mod email;
pub mod id;
pub mod listing;
pub mod price;
pub mod product;
pub mod status;

mod lenient;

pub use credential::{BearerToken, Session, SessionOrigin};
pub use email::{Email, EmailError};
pub use id::*;
pub use listing::{ListingBody, ProductListing, ShapeViolation};
pub use price::Price;
pub use product::{Product, ProductColor, ProductImage};
pub use status::*;
