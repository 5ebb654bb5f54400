//
//  stack-teams-api
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/10.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! This module holds the session credential for a Teams instance and the
//! user-impersonation token exchange.
//!
//! ## Access tokens
//!
//! Every API v3 call authenticates with a pre-issued access token sent as
//! `Authorization: Bearer <token>`. The token is supplied at client
//! construction and is read-only afterwards.
//!
//! ## Impersonation (Enterprise only)
//!
//! Enterprise instances can exchange the access token plus a service API
//! key for a short-lived token scoped to another account, via the v2.3
//! endpoint `/access-tokens/exchange`. The feature is off by default and
//! must be enabled by Stack Overflow support; attempting the exchange on
//! an instance without it yields [`ApiError::Auth`].
//!
//! Exchange tokens are deliberately not cached: each impersonated
//! operation acquires a fresh token, threads it through a single request,
//! and drops it.
//!
//! # Example
//!
//! ```rust,no_run
//! use stack_teams_api::StackClient;
//!
//! # async fn example() -> Result<(), stack_teams_api::ApiError> {
//! let client = StackClient::builder("https://teams.example.com", "token")
//!     .key("service-key")
//!     .build()?;
//!
//! // An account ID of -1 impersonates the Community user.
//! let token = client.acquire_impersonation_token(3).await?;
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Utc};
use reqwest::RequestBuilder;
use serde::Deserialize;
use tracing::info;

use crate::api::common::{ApiError, ApiResult};
use crate::StackClient;

/// The session credential for a Teams instance.
///
/// Holds the bearer access token used on every request and the optional
/// service API key required for user impersonation. Immutable after
/// construction.
///
/// # Example
///
/// ```rust
/// use stack_teams_api::auth::Auth;
///
/// let auth = Auth::new("my-token").with_key("service-key");
/// assert_eq!(auth.bearer_value(), "Bearer my-token");
/// assert_eq!(auth.key(), Some("service-key"));
/// ```
#[derive(Debug, Clone)]
pub struct Auth {
    token: String,
    key: Option<String>,
}

impl Auth {
    /// Creates a credential from an access token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            key: None,
        }
    }

    /// Attaches the impersonation API key (Enterprise only).
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Returns the access token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the impersonation API key, if one was configured.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Returns the value of the `Authorization` header for this
    /// credential.
    pub fn bearer_value(&self) -> String {
        format!("Bearer {}", self.token)
    }

    /// Applies the credential to an HTTP request.
    pub fn apply_to_request(&self, request: RequestBuilder) -> RequestBuilder {
        request.bearer_auth(&self.token)
    }
}

/// Response envelope of the v2.3 token exchange endpoint.
///
/// The exchange endpoint predates API v3 and uses the classic
/// snake_case envelope with an `items` array.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenExchangeResponse {
    /// The granted tokens; a successful exchange yields exactly one.
    #[serde(default)]
    pub items: Vec<ImpersonationGrant>,
    /// Whether further results exist (always `false` in practice).
    #[serde(default)]
    pub has_more: bool,
}

/// A single impersonation grant returned by the token exchange.
#[derive(Debug, Clone, Deserialize)]
pub struct ImpersonationGrant {
    /// The short-lived impersonation token.
    pub access_token: String,

    /// The account the token is scoped to.
    #[serde(default)]
    pub account_id: Option<i64>,

    /// Expiry of the token, as reported by the server.
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub expires_on_date: Option<DateTime<Utc>>,

    /// Scopes carried over onto the impersonation token.
    #[serde(default)]
    pub scope: Vec<String>,

    /// The exchange type that produced this grant (`impersonate`).
    #[serde(default)]
    pub exchange_type: Option<String>,

    /// The access token the grant was exchanged from.
    #[serde(default)]
    pub original_access_token: Option<String>,
}

impl StackClient {
    /// Exchanges the configured API key and an account ID for a
    /// short-lived impersonation token.
    ///
    /// User impersonation is only available on Stack Overflow Enterprise,
    /// uses API v2.3 rather than v3, and is disabled by default on every
    /// instance (enabling it requires a support ticket). An account ID of
    /// `-1` impersonates the Community user.
    ///
    /// The returned token is not stored on the client; callers (and the
    /// `impersonate_*` facade methods) use it for a single operation and
    /// discard it.
    ///
    /// # Parameters
    ///
    /// * `account_id` - The account ID to impersonate
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Auth`] when the instance is not Enterprise,
    /// when no API key was configured, when impersonation is not enabled
    /// on the instance, or when the exchange is denied; other failures
    /// surface as [`ApiError::Http`] or [`ApiError::Transport`].
    pub async fn acquire_impersonation_token(&self, account_id: i64) -> ApiResult<String> {
        if !self.is_enterprise() {
            return Err(ApiError::Auth(
                "user impersonation is only available on Stack Overflow Enterprise".to_string(),
            ));
        }
        let Some(key) = self.auth.key() else {
            return Err(ApiError::Auth(
                "an API key is required for user impersonation; configure one with \
                 StackClient::builder(url, token).key(key)"
                    .to_string(),
            ));
        };

        let url = format!("{}/api/2.3/access-tokens/exchange", self.base_url);
        let account = account_id.to_string();

        info!(account_id, "generating impersonation token");
        let response = self
            .http
            .post(&url)
            .header("X-API-Key", key)
            .query(&[
                ("access_tokens", self.auth.token()),
                ("exchange_type", "impersonate"),
                ("account_id", account.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_exchange_failure(status.as_u16(), body));
        }

        let body = response.text().await?;
        let exchange: TokenExchangeResponse =
            serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))?;
        let grant = exchange.items.into_iter().next().ok_or_else(|| {
            ApiError::Decode("token exchange response contained no items".to_string())
        })?;

        info!(account_id, "impersonation token successfully generated");
        Ok(grant.access_token)
    }
}

/// Maps a failed token exchange onto an [`ApiError`].
///
/// The exchange endpoint reports its failures in the classic
/// `error_id`/`error_name`/`error_message` shape. Two of them are
/// authentication problems in disguise:
///
/// - `bad_parameter` on `access_tokens` means impersonation has not been
///   enabled on the instance
/// - `access_denied` means the token does not belong to a service account
///
/// Everything else keeps its status code and body.
fn classify_exchange_failure(status: u16, body: String) -> ApiError {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(&body) {
        let error_name = json.get("error_name").and_then(|v| v.as_str());
        let error_message = json.get("error_message").and_then(|v| v.as_str());

        if error_name == Some("bad_parameter") && error_message == Some("access_tokens") {
            return ApiError::Auth(format!(
                "impersonation is not enabled on this instance; contact \
                 support@stackoverflow.com to enable it ({body})"
            ));
        }
        if error_name == Some("access_denied") {
            return ApiError::Auth(error_message.unwrap_or(&body).to_string());
        }
    }

    if status == 401 {
        return ApiError::Auth(body);
    }
    ApiError::Http { status, body }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_value() {
        let auth = Auth::new("abc123");
        assert_eq!(auth.bearer_value(), "Bearer abc123");
        assert_eq!(auth.key(), None);
    }

    #[test]
    fn test_exchange_disabled_maps_to_auth() {
        let body = r#"{"error_id": 400, "error_message": "access_tokens", "error_name": "bad_parameter"}"#;
        let err = classify_exchange_failure(400, body.to_string());
        assert!(matches!(err, ApiError::Auth(_)));
    }

    #[test]
    fn test_exchange_access_denied_maps_to_auth() {
        let body = r#"{"error_id": 403, "error_message": "Access denied - impersonation is only allowed via service accounts", "error_name": "access_denied"}"#;
        let err = classify_exchange_failure(403, body.to_string());
        assert!(matches!(err, ApiError::Auth(_)));
    }

    #[test]
    fn test_exchange_other_failures_keep_status() {
        let err = classify_exchange_failure(500, "boom".to_string());
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn test_parse_exchange_response() {
        let json = r#"{
            "items": [{
                "scope": ["custom_timestamps", "write_access"],
                "exchange_type": "impersonate",
                "account_id": 3,
                "expires_on_date": 1717777554,
                "original_access_token": "ORIGINAL_TOKEN_STRING",
                "access_token": "IMPERSONATION_TOKEN_STRING"
            }],
            "has_more": false
        }"#;
        let response: TokenExchangeResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.items.len(), 1);
        let grant = &response.items[0];
        assert_eq!(grant.access_token, "IMPERSONATION_TOKEN_STRING");
        assert_eq!(grant.account_id, Some(3));
        assert!(grant.expires_on_date.is_some());
    }
}
