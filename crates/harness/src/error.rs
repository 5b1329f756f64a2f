//! Harness error types.
//!
//! Errors fall into two tiers:
//!
//! - [`AuthError`] is fatal: without a session no later step can run.
//! - [`ListingError`] is reported: the scenario records it against the step
//!   and moves on.
//!
//! Both classify themselves with a [`FailureKind`] for reporting.

use reqwest::StatusCode;
use thiserror::Error;

use crate::config::ConfigError;

/// Coarse classification of a failed request or check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// 401: token missing, invalid or expired.
    Unauthorized,
    /// 403: authenticated but lacking the required role.
    Forbidden,
    /// Any other status the operation does not accept.
    UnexpectedStatus,
    /// The server could not be reached or the response could not be read.
    Connection,
    /// The body was not the expected JSON.
    Parse,
    /// The response parsed but failed a harness assertion.
    Assertion,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
            Self::UnexpectedStatus => "unexpected status",
            Self::Connection => "connection error",
            Self::Parse => "parse error",
            Self::Assertion => "assertion failed",
        };
        f.write_str(label)
    }
}

/// Which auth exchange an [`AuthError`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthStage {
    /// `POST /auth/login`
    Login,
    /// `POST /auth/register`
    Registration,
}

impl std::fmt::Display for AuthStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Login => write!(f, "login"),
            Self::Registration => write!(f, "registration"),
        }
    }
}

/// Fatal authentication failures.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The server could not be reached, or the response body could not be read.
    #[error("{stage} request to {url} failed: {source}")]
    Connection {
        stage: AuthStage,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Login answered 401 and registration-on-demand is disabled.
    #[error("invalid credentials for {email}: {body}")]
    InvalidCredentials { email: String, body: String },

    /// The exchange answered with a status it does not accept.
    #[error("{stage} failed with status {status}: {body}")]
    UnexpectedStatus {
        stage: AuthStage,
        status: StatusCode,
        body: String,
    },

    /// The success body was not valid JSON of the expected shape.
    #[error("could not parse {stage} response: {source}")]
    Parse {
        stage: AuthStage,
        body: String,
        #[source]
        source: serde_json::Error,
    },

    /// The success body carried no usable token.
    #[error("{stage} response carried no token")]
    MissingToken { stage: AuthStage },
}

impl AuthError {
    /// Classify this error.
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Connection { .. } => FailureKind::Connection,
            Self::InvalidCredentials { .. } => FailureKind::Unauthorized,
            Self::UnexpectedStatus { status, .. } => classify_status(*status),
            Self::Parse { .. } | Self::MissingToken { .. } => FailureKind::Parse,
        }
    }

    /// HTTP status, if a response was received.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::InvalidCredentials { .. } => Some(StatusCode::UNAUTHORIZED),
            Self::UnexpectedStatus { status, .. } => Some(*status),
            Self::Connection { .. } | Self::Parse { .. } | Self::MissingToken { .. } => None,
        }
    }
}

/// Reported (non-fatal) listing failures.
#[derive(Debug, Error)]
pub enum ListingError {
    /// 401: the token was rejected or missing.
    #[error("unauthorized (401): {body}")]
    Unauthorized { body: String },

    /// 403: the user lacks admin privileges.
    #[error("forbidden (403): {body}")]
    Forbidden { body: String },

    /// Any other non-200 status.
    #[error("request failed with status {status}: {body}")]
    UnexpectedStatus { status: StatusCode, body: String },

    /// The server could not be reached, or the response body could not be read.
    #[error("request to {url} failed: {source}")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// A 200 body that is not a listing.
    #[error("could not parse listing: {source}")]
    Parse {
        body: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ListingError {
    /// Build the error for a non-200 response.
    #[must_use]
    pub fn from_status(status: StatusCode, body: String) -> Self {
        match classify_status(status) {
            FailureKind::Unauthorized => Self::Unauthorized { body },
            FailureKind::Forbidden => Self::Forbidden { body },
            _ => Self::UnexpectedStatus { status, body },
        }
    }

    /// Classify this error.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Unauthorized { .. } => FailureKind::Unauthorized,
            Self::Forbidden { .. } => FailureKind::Forbidden,
            Self::UnexpectedStatus { .. } => FailureKind::UnexpectedStatus,
            Self::Connection { .. } => FailureKind::Connection,
            Self::Parse { .. } => FailureKind::Parse,
        }
    }

    /// HTTP status, if a response was received.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Unauthorized { .. } => Some(StatusCode::UNAUTHORIZED),
            Self::Forbidden { .. } => Some(StatusCode::FORBIDDEN),
            Self::UnexpectedStatus { status, .. } => Some(*status),
            Self::Parse { .. } => Some(StatusCode::OK),
            Self::Connection { .. } => None,
        }
    }

    /// Raw response body, if one was read.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { body }
            | Self::Forbidden { body }
            | Self::UnexpectedStatus { body, .. }
            | Self::Parse { body, .. } => Some(body),
            Self::Connection { .. } => None,
        }
    }
}

/// Top-level harness errors.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Authentication failed; the run cannot continue.
    #[error("authentication failed: {0}")]
    Auth(#[from] AuthError),

    /// The HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

fn classify_status(status: StatusCode) -> FailureKind {
    match status.as_u16() {
        401 => FailureKind::Unauthorized,
        403 => FailureKind::Forbidden,
        _ => FailureKind::UnexpectedStatus,
    }
}
