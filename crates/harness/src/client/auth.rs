//! Login and registration exchanges.
//!
//! Both endpoints answer with the same flat body:
//! `{token, id, firstName, lastName, email, role, ...}`.

use reqwest::StatusCode;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use stylestore_core::{BearerToken, Email, Session, SessionOrigin, UserId, UserRole};
use tracing::instrument;
use url::Url;

use crate::config::{AdminProfile, LoginCredentials};
use crate::error::{AuthError, AuthStage};

/// Request body for `POST /auth/login`.
#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Request body for `POST /auth/register`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RegisterRequest<'a> {
    first_name: &'a str,
    last_name: &'a str,
    email: &'a str,
    password: &'a str,
    role: UserRole,
}

/// Success body from either auth endpoint.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthResponse {
    #[serde(default)]
    token: Option<String>,
    /// UUID on this server; left untyped so other ID formats are ignored.
    #[serde(default)]
    id: Option<serde_json::Value>,
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    role: Option<UserRole>,
}

/// Result of a login attempt that reached the server.
pub enum LoginOutcome {
    /// 200 with a usable token.
    Authenticated(Session),
    /// 401; the caller decides whether to register.
    Rejected { body: String },
}

/// Log in with an email/password pair.
///
/// # Errors
///
/// Returns `AuthError::Connection` if the server cannot be reached,
/// `AuthError::UnexpectedStatus` for any status other than 200 or 401, and
/// `AuthError::Parse`/`AuthError::MissingToken` for an unusable 200 body.
#[instrument(skip(client, credentials), fields(email = %credentials.email))]
pub async fn login(
    client: &reqwest::Client,
    url: Url,
    credentials: &LoginCredentials,
) -> Result<LoginOutcome, AuthError> {
    let stage = AuthStage::Login;
    let request = LoginRequest {
        email: credentials.email.as_str(),
        password: credentials.password.expose_secret(),
    };

    let (status, body) = post_json(client, url, &request, stage).await?;

    if status == StatusCode::OK {
        parse_session(&body, stage, SessionOrigin::Login).map(LoginOutcome::Authenticated)
    } else if status == StatusCode::UNAUTHORIZED {
        Ok(LoginOutcome::Rejected { body })
    } else {
        Err(AuthError::UnexpectedStatus {
            stage,
            status,
            body,
        })
    }
}

/// Register an account and return its session.
///
/// # Errors
///
/// Returns `AuthError::Connection` if the server cannot be reached,
/// `AuthError::UnexpectedStatus` for any status other than 201, and
/// `AuthError::Parse`/`AuthError::MissingToken` for an unusable 201 body.
#[instrument(skip(client, profile), fields(email = %profile.email, role = %profile.role))]
pub async fn register(
    client: &reqwest::Client,
    url: Url,
    profile: &AdminProfile,
) -> Result<Session, AuthError> {
    let stage = AuthStage::Registration;
    let request = RegisterRequest {
        first_name: &profile.first_name,
        last_name: &profile.last_name,
        email: profile.email.as_str(),
        password: profile.password.expose_secret(),
        role: profile.role,
    };

    let (status, body) = post_json(client, url, &request, stage).await?;

    if status == StatusCode::CREATED {
        parse_session(&body, stage, SessionOrigin::Registration)
    } else {
        Err(AuthError::UnexpectedStatus {
            stage,
            status,
            body,
        })
    }
}

/// POST a JSON body and read the response as text.
async fn post_json<T: Serialize>(
    client: &reqwest::Client,
    url: Url,
    request: &T,
    stage: AuthStage,
) -> Result<(StatusCode, String), AuthError> {
    let url_text = url.to_string();
    let connection = |source| AuthError::Connection {
        stage,
        url: url_text.clone(),
        source,
    };

    let response = client
        .post(url)
        .json(request)
        .send()
        .await
        .map_err(connection)?;

    let status = response.status();
    let body = response.text().await.map_err(connection)?;
    tracing::debug!(%status, bytes = body.len(), "{stage} response received");

    Ok((status, body))
}

/// Turn a success body into a session.
fn parse_session(body: &str, stage: AuthStage, origin: SessionOrigin) -> Result<Session, AuthError> {
    let response: AuthResponse =
        serde_json::from_str(body).map_err(|source| AuthError::Parse {
            stage,
            body: body.to_string(),
            source,
        })?;

    let token = response
        .token
        .as_deref()
        .and_then(BearerToken::parse)
        .ok_or(AuthError::MissingToken { stage })?;

    Ok(Session {
        token,
        user_id: response
            .id
            .as_ref()
            .and_then(serde_json::Value::as_str)
            .and_then(UserId::parse),
        first_name: response.first_name.unwrap_or_default(),
        last_name: response.last_name.unwrap_or_default(),
        email: response.email.as_deref().and_then(|e| Email::parse(e).ok()),
        role: response.role.unwrap_or_default(),
        origin,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_session() {
        let body = r#"{
            "id": "9d3c1f7e-6b2a-4c8d-a1e5-0f9b8c7d6e5a",
            "firstName": "John",
            "lastName": "Doe",
            "email": "johndoe@example.com",
            "role": "admin",
            "token": "eyJhbGciOiJIUzI1NiJ9.payload.sig"
        }"#;
        let session = parse_session(body, AuthStage::Login, SessionOrigin::Login).unwrap();
        assert_eq!(session.token.expose(), "eyJhbGciOiJIUzI1NiJ9.payload.sig");
        assert_eq!(session.display_name(), "John Doe");
        assert!(session.role.is_admin());
        assert!(session.user_id.is_some());
        assert_eq!(session.origin, SessionOrigin::Login);
    }

    #[test]
    fn test_parse_session_tolerates_odd_fields() {
        let body = r#"{"token": "t", "id": 7, "email": "not-an-email", "role": "owner"}"#;
        let session = parse_session(body, AuthStage::Login, SessionOrigin::Login).unwrap();
        assert!(session.user_id.is_none());
        assert!(session.email.is_none());
        assert_eq!(session.role, UserRole::Unknown);
        assert_eq!(session.display_name(), "N/A");
    }

    #[test]
    fn test_parse_session_requires_token() {
        for body in [r#"{"firstName": "A"}"#, r#"{"token": ""}"#, r#"{"token": null}"#] {
            assert!(matches!(
                parse_session(body, AuthStage::Registration, SessionOrigin::Registration),
                Err(AuthError::MissingToken {
                    stage: AuthStage::Registration
                })
            ));
        }
    }

    #[test]
    fn test_parse_session_rejects_non_json() {
        assert!(matches!(
            parse_session("<html>", AuthStage::Login, SessionOrigin::Login),
            Err(AuthError::Parse { .. })
        ));
    }

    #[test]
    fn test_register_request_shape() {
        let request = RegisterRequest {
            first_name: "Admin",
            last_name: "User",
            email: "admin@stylestore.com",
            password: "admin123",
            role: UserRole::Admin,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "firstName": "Admin",
                "lastName": "User",
                "email": "admin@stylestore.com",
                "password": "admin123",
                "role": "admin"
            })
        );
    }
}
