//! Email/password login for the AI Team service.
//!
//! The service has no token refresh endpoint: login sets session cookies,
//! the cookie service exchanges them for a bearer token valid roughly ten
//! hours, and on expiry the caller logs in again. The bearer token is
//! read-only for the lifetime of any client constructed from it.

use std::time::Duration;

use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::client::{map_send_error, process_error_response};
use crate::error::{Error, Result};
use crate::observability::{AUTH_LOGIN_ERRORS, AUTH_LOGINS};

/// Default base URL for the login endpoint.
pub const DEFAULT_AUTH_URL: &str = "https://api.edgedelta.com";

/// Default base URL for the cookie service.
pub const DEFAULT_MAIN_URL: &str = "https://api.edgedelta.com/v1";

/// How long an issued bearer token stays valid (observed ~10 hours).
const TOKEN_VALIDITY: Duration = Duration::from_secs(35_000);

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct JwtResponse {
    bearer_token: String,
}

/// An authenticated session against the AI Team service.
///
/// The underlying HTTP client carries a cookie jar: the login call sets the
/// session cookies that the cookie-service exchange reads.
#[derive(Debug)]
pub struct AuthSession {
    client: ReqwestClient,
    auth_url: String,
    main_url: String,
    timeout: Duration,
    bearer: Option<String>,
    expires_at: Option<OffsetDateTime>,
}

impl AuthSession {
    /// Creates a session against the production endpoints.
    pub fn new() -> Result<Self> {
        Self::with_options(None, None, None)
    }

    /// Creates a session with custom endpoints, for tests or alternate
    /// deployments.
    pub fn with_options(
        auth_url: Option<String>,
        main_url: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let timeout = timeout.unwrap_or(DEFAULT_TIMEOUT);
        let client = ReqwestClient::builder()
            .cookie_store(true)
            .timeout(timeout)
            .build()
            .map_err(|e| {
                Error::http_client(
                    format!("Failed to build HTTP client: {}", e),
                    Some(Box::new(e)),
                )
            })?;
        Ok(Self {
            client,
            auth_url: auth_url.unwrap_or_else(|| DEFAULT_AUTH_URL.to_string()),
            main_url: main_url.unwrap_or_else(|| DEFAULT_MAIN_URL.to_string()),
            timeout,
            bearer: None,
            expires_at: None,
        })
    }

    /// Exchanges an email/password pair for a bearer token.
    ///
    /// Two calls: the login endpoint sets session cookies, then the cookie
    /// service converts them into a bearer token. The token is recorded on
    /// the session and also returned.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<String> {
        AUTH_LOGINS.click();

        let url = format!("{}/auth/login", self.auth_url);
        let response = self
            .client
            .post(&url)
            .json(&LoginRequest {
                username: email,
                password,
            })
            .send()
            .await
            .map_err(|e| map_send_error(e, self.timeout))?;
        if !response.status().is_success() {
            AUTH_LOGIN_ERRORS.click();
            return Err(process_error_response(response).await);
        }
        // The login response body is irrelevant; the cookies are the point.
        let _ = response.bytes().await;

        let url = format!("{}/cookie_service/get_jwt_from_cookie", self.main_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| map_send_error(e, self.timeout))?;
        if !response.status().is_success() {
            AUTH_LOGIN_ERRORS.click();
            return Err(process_error_response(response).await);
        }
        let jwt: JwtResponse = response.json().await.map_err(|e| {
            Error::serialization(
                format!("Failed to parse cookie service response: {}", e),
                Some(Box::new(e)),
            )
        })?;

        self.bearer = Some(jwt.bearer_token.clone());
        self.expires_at = Some(OffsetDateTime::now_utc() + TOKEN_VALIDITY);
        Ok(jwt.bearer_token)
    }

    /// Returns the bearer token, if a login succeeded.
    pub fn bearer(&self) -> Option<&str> {
        self.bearer.as_deref()
    }

    /// Returns true if the token is missing or past its validity window.
    ///
    /// There is no refresh endpoint; an expired session requires a fresh
    /// [`AuthSession::login`].
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => OffsetDateTime::now_utc() >= expires_at,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_session_is_expired() {
        let session = AuthSession::new().unwrap();
        assert!(session.is_expired());
        assert!(session.bearer().is_none());
    }

    #[test]
    fn custom_endpoints() {
        let session = AuthSession::with_options(
            Some("http://localhost:8080".to_string()),
            Some("http://localhost:8080/v1".to_string()),
            Some(Duration::from_secs(5)),
        )
        .unwrap();
        assert_eq!(session.auth_url, "http://localhost:8080");
        assert_eq!(session.main_url, "http://localhost:8080/v1");
    }
}
