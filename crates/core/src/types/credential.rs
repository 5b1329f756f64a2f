//! Bearer credentials obtained from the auth endpoints.
//!
//! A [`Session`] lives for one harness run. It is never written to disk.

use secrecy::{ExposeSecret, SecretString};

use super::{Email, UserId, UserRole};

/// Opaque bearer token sent in the `Authorization` header.
///
/// Always non-empty. `Debug` output is redacted.
#[derive(Clone)]
pub struct BearerToken(SecretString);

impl BearerToken {
    /// Wrap a raw token, rejecting empty or whitespace-only strings.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        Some(Self(SecretString::from(raw.to_owned())))
    }

    /// The raw token text.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }

    /// Value for the `Authorization` header.
    #[must_use]
    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.expose())
    }
}

impl std::fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BearerToken([REDACTED])")
    }
}

/// How the harness came to hold its token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionOrigin {
    /// The configured account logged in.
    Login,
    /// Login was rejected and the fallback admin account was registered.
    Registration,
}

impl std::fmt::Display for SessionOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Login => write!(f, "login"),
            Self::Registration => write!(f, "registration"),
        }
    }
}

/// An authenticated identity: the bearer token plus display fields.
#[derive(Debug, Clone)]
pub struct Session {
    /// Token for subsequent requests.
    pub token: BearerToken,
    /// Server-side user ID, when returned.
    pub user_id: Option<UserId>,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Account email, when returned.
    pub email: Option<Email>,
    /// Account role.
    pub role: UserRole,
    /// Which auth exchange produced this session.
    pub origin: SessionOrigin,
}

impl Session {
    /// `"First Last"`, or `"N/A"` when the server sent neither.
    #[must_use]
    pub fn display_name(&self) -> String {
        let name = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let name = name.trim();
        if name.is_empty() {
            "N/A".to_owned()
        } else {
            name.to_owned()
        }
    }
}
