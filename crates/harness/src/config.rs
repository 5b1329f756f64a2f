//! Harness configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional; defaults target a development server on localhost.
//!
//! - `STYLESTORE_API_URL` - API base URL including the `/api` prefix
//!   (default: `http://localhost:5000/api`)
//! - `STYLESTORE_LOGIN_EMAIL` / `STYLESTORE_LOGIN_PASSWORD` - Account to log in with
//! - `STYLESTORE_ADMIN_FIRST_NAME` / `STYLESTORE_ADMIN_LAST_NAME` - Fallback admin profile name
//! - `STYLESTORE_ADMIN_EMAIL` / `STYLESTORE_ADMIN_PASSWORD` - Fallback admin account
//! - `STYLESTORE_REGISTER_ON_DEMAND` - Register the fallback admin when login
//!   is rejected (default: true)

use secrecy::SecretString;
use stylestore_core::{Email, UserRole};
use thiserror::Error;
use url::Url;

/// Default API base URL (local development server).
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

const DEFAULT_LOGIN_EMAIL: &str = "johndoe@example.com";
const DEFAULT_LOGIN_PASSWORD: &str = "password123";
const DEFAULT_ADMIN_FIRST_NAME: &str = "Admin";
const DEFAULT_ADMIN_LAST_NAME: &str = "User";
const DEFAULT_ADMIN_EMAIL: &str = "admin@stylestore.com";
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Invalid API URL {0}: {1}")]
    InvalidApiUrl(String, String),
}

/// Email/password pair for `POST /auth/login`.
#[derive(Debug, Clone)]
pub struct LoginCredentials {
    pub email: Email,
    pub password: SecretString,
}

/// Account registered when login is rejected and registration-on-demand
/// is enabled.
#[derive(Debug, Clone)]
pub struct AdminProfile {
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub password: SecretString,
    pub role: UserRole,
}

/// Harness configuration.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// API base URL, e.g. `http://localhost:5000/api`
    pub api_url: Url,
    /// Account used by the scenario's login step
    pub login: LoginCredentials,
    /// Fallback admin account
    pub admin: AdminProfile,
    /// Register `admin` when `login` is rejected with 401
    pub register_on_demand: bool,
}

impl HarnessConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_url = parse_api_url(&get_env_or_default("STYLESTORE_API_URL", DEFAULT_API_URL))?;

        let login = LoginCredentials {
            email: get_email("STYLESTORE_LOGIN_EMAIL", DEFAULT_LOGIN_EMAIL)?,
            password: SecretString::from(get_env_or_default(
                "STYLESTORE_LOGIN_PASSWORD",
                DEFAULT_LOGIN_PASSWORD,
            )),
        };

        let admin = AdminProfile {
            first_name: get_env_or_default("STYLESTORE_ADMIN_FIRST_NAME", DEFAULT_ADMIN_FIRST_NAME),
            last_name: get_env_or_default("STYLESTORE_ADMIN_LAST_NAME", DEFAULT_ADMIN_LAST_NAME),
            email: get_email("STYLESTORE_ADMIN_EMAIL", DEFAULT_ADMIN_EMAIL)?,
            password: SecretString::from(get_env_or_default(
                "STYLESTORE_ADMIN_PASSWORD",
                DEFAULT_ADMIN_PASSWORD,
            )),
            role: UserRole::Admin,
        };

        let register_on_demand = match get_optional_env("STYLESTORE_REGISTER_ON_DEMAND") {
            Some(value) => parse_bool(&value).ok_or_else(|| {
                ConfigError::InvalidEnvVar(
                    "STYLESTORE_REGISTER_ON_DEMAND".to_string(),
                    format!("expected true/false, got '{value}'"),
                )
            })?,
            None => true,
        };

        Ok(Self {
            api_url,
            login,
            admin,
            register_on_demand,
        })
    }

    /// Default configuration pointed at the given API base URL.
    ///
    /// Reads no environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidApiUrl` if the URL is not an absolute
    /// http(s) URL.
    pub fn for_api_url(api_url: &str) -> Result<Self, ConfigError> {
        let default_email = |raw: &str| {
            Email::parse(raw)
                .map_err(|e| ConfigError::InvalidEnvVar(raw.to_string(), e.to_string()))
        };

        Ok(Self {
            api_url: parse_api_url(api_url)?,
            login: LoginCredentials {
                email: default_email(DEFAULT_LOGIN_EMAIL)?,
                password: SecretString::from(DEFAULT_LOGIN_PASSWORD),
            },
            admin: AdminProfile {
                first_name: DEFAULT_ADMIN_FIRST_NAME.to_string(),
                last_name: DEFAULT_ADMIN_LAST_NAME.to_string(),
                email: default_email(DEFAULT_ADMIN_EMAIL)?,
                password: SecretString::from(DEFAULT_ADMIN_PASSWORD),
                role: UserRole::Admin,
            },
            register_on_demand: true,
        })
    }

    /// Replace the API base URL.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidApiUrl` if the URL is not an absolute
    /// http(s) URL.
    pub fn with_api_url(mut self, api_url: &str) -> Result<Self, ConfigError> {
        self.api_url = parse_api_url(api_url)?;
        Ok(self)
    }

    /// Enable or disable registration-on-demand.
    #[must_use]
    pub const fn with_register_on_demand(mut self, enabled: bool) -> Self {
        self.register_on_demand = enabled;
        self
    }

    /// Build the URL for an endpoint below the API base, e.g.
    /// `endpoint(&["auth", "login"])` → `http://localhost:5000/api/auth/login`.
    #[must_use]
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.api_url.clone();
        // `parse_api_url` rejects cannot-be-a-base URLs, so this always applies.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse and validate the API base URL.
fn parse_api_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ConfigError::InvalidApiUrl(raw.to_string(), e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidApiUrl(
            raw.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidApiUrl(
            raw.to_string(),
            "not a base URL".to_string(),
        ));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(ConfigError::InvalidApiUrl(
            raw.to_string(),
            "must not carry a query or fragment".to_string(),
        ));
    }

    Ok(url)
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get an email address from the environment, validating it.
fn get_email(key: &str, default: &str) -> Result<Email, ConfigError> {
    let value = get_env_or_default(key, default);
    Email::parse(&value).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Parse a boolean flag value.
fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = HarnessConfig::for_api_url(DEFAULT_API_URL).unwrap();
        assert_eq!(config.login.email.as_str(), "johndoe@example.com");
        assert_eq!(config.admin.email.as_str(), "admin@stylestore.com");
        assert_eq!(config.admin.role, UserRole::Admin);
        assert_eq!(config.admin.password.expose_secret(), "admin123");
        assert!(config.register_on_demand);
    }

    #[test]
    fn test_endpoint_keeps_api_prefix() {
        let config = HarnessConfig::for_api_url("http://localhost:5000/api").unwrap();
        assert_eq!(
            config.endpoint(&["auth", "login"]).as_str(),
            "http://localhost:5000/api/auth/login"
        );

        let config = HarnessConfig::for_api_url("http://localhost:5000/api/").unwrap();
        assert_eq!(
            config.endpoint(&["products"]).as_str(),
            "http://localhost:5000/api/products"
        );
    }

    #[test]
    fn test_endpoint_at_root() {
        let config = HarnessConfig::for_api_url("https://shop.example.com").unwrap();
        assert_eq!(
            config.endpoint(&["products"]).as_str(),
            "https://shop.example.com/products"
        );
    }

    #[test]
    fn test_rejects_bad_urls() {
        assert!(matches!(
            HarnessConfig::for_api_url("not a url"),
            Err(ConfigError::InvalidApiUrl(_, _))
        ));
        assert!(matches!(
            HarnessConfig::for_api_url("ftp://localhost/api"),
            Err(ConfigError::InvalidApiUrl(_, _))
        ));
        assert!(matches!(
            HarnessConfig::for_api_url("mailto:admin@stylestore.com"),
            Err(ConfigError::InvalidApiUrl(_, _))
        ));
        assert!(matches!(
            HarnessConfig::for_api_url("http://localhost:5000/api?x=1"),
            Err(ConfigError::InvalidApiUrl(_, _))
        ));
    }

    #[test]
    fn test_overrides() {
        let config = HarnessConfig::for_api_url(DEFAULT_API_URL)
            .unwrap()
            .with_api_url("http://staging.example.com/api")
            .unwrap()
            .with_register_on_demand(false);
        assert_eq!(config.api_url.host_str(), Some("staging.example.com"));
        assert!(!config.register_on_demand);
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool(" 0 "), Some(false));
        assert_eq!(parse_bool("off"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
