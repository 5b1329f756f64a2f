//! StyleStore API test harness.
//!
//! Drives the StyleStore REST API end to end: authenticate (logging in, or
//! registering a fallback admin when the login is rejected), then query the
//! admin product listing with a fixed set of filters and check each
//! response against the pagination contract.
//!
//! # Modules
//!
//! - [`config`] - Environment-driven configuration
//! - [`client`] - HTTP client for the auth and products endpoints
//! - [`scenario`] - The ordered login → listing scenario
//! - [`report`] - `tracing` diagnostics for sessions, listings and failures
//! - [`error`] - Error types and failure classification

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod client;
pub mod config;
pub mod error;
pub mod report;
pub mod scenario;

pub use client::{ApiClient, ListingQuery};
pub use config::{AdminProfile, ConfigError, HarnessConfig, LoginCredentials};
pub use error::{AuthError, AuthStage, FailureKind, HarnessError, ListingError};
pub use scenario::{ListingStep, ScenarioReport, StepFailure, StepOutcome, StepReport};
