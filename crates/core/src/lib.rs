//! StyleStore Core - Shared types library.
//!
//! This crate provides the domain types used by the StyleStore API harness:
//! - `harness` - HTTP client and scenario runner against the StyleStore API
//! - `cli` - Command-line front end for running the harness
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. Wire
//! shapes returned by the server are deserialized leniently here and
//! normalized before any harness logic sees them.
//!
//! # Modules
//!
//! - [`types`] - IDs, prices, emails, roles, credentials, products and listings

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
