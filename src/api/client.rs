//
//  stack-teams-api
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/10.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # HTTP Client for the Stack Overflow for Teams API
//!
//! This module provides the core HTTP client for interacting with the
//! Teams API v3. It handles platform routing, authentication, pagination,
//! and request/response serialization.
//!
//! ## Features
//!
//! - Automatic platform routing (Business/Basic vs Enterprise)
//! - Authorization header injection per request
//! - Page-by-page aggregation for listing endpoints
//! - Typed errors carrying the exact status code and response body
//! - Fixed per-request timeout, custom User-Agent header
//!
//! ## Platform Routing
//!
//! The client supports both hosted flavors of the product:
//!
//! | Flavor | Given URL | API root |
//! |--------|-----------|----------|
//! | Business/Basic | `https://stackoverflowteams.com/c/<team>` | `https://api.stackoverflowteams.com/v3/teams/<team>` |
//! | Enterprise | `https://<host>` | `https://<host>/api/v3` |
//!
//! Enterprise instances may additionally scope the client to a private
//! team, which appends `/teams/<private-team>` to the API root.

use std::time::Duration;

use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::api::common::{ApiError, ApiResult, PaginatedResponse};
use crate::auth::Auth;

/// Default per-request timeout applied by the underlying HTTP client.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// User-Agent sent with every request.
const USER_AGENT: &str = concat!("stack-teams-api/", env!("CARGO_PKG_VERSION"));

/// Hosted domain of Stack Overflow for Teams Business and Basic.
const TEAMS_DOMAIN: &str = "stackoverflowteams.com";

/// API root for Business/Basic teams.
const TEAMS_API_ROOT: &str = "https://api.stackoverflowteams.com/v3/teams";

/// Represents the flavor of Stack Overflow for Teams being accessed.
///
/// The two flavors route API calls differently and differ in feature
/// availability: user impersonation is only available on Enterprise.
///
/// # Example
///
/// ```rust,no_run
/// use stack_teams_api::api::client::{Platform, StackClient};
///
/// # fn example() -> Result<(), stack_teams_api::ApiError> {
/// let client = StackClient::new("https://stackoverflowteams.com/c/my-team", "token")?;
/// assert!(matches!(client.platform(), Platform::Business { .. }));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Platform {
    /// Stack Overflow for Teams Business or Basic, hosted at
    /// `stackoverflowteams.com` and addressed by team slug.
    Business {
        /// The team slug extracted from the `/c/<slug>` URL path.
        team_slug: String,
    },

    /// Stack Overflow Enterprise at a customer-controlled host.
    Enterprise {
        /// Optional private-team slug scoping every API call.
        private_team: Option<String>,
    },
}

/// Authentication scope of a single request.
///
/// Almost every request uses the configured access token. Impersonated
/// writes carry a one-shot exchange token instead, which is discarded as
/// soon as the request completes; it is never stored on the client.
#[derive(Debug, Clone)]
pub(crate) enum AuthScope {
    /// Use the client's configured access token.
    Standard,
    /// Use a freshly acquired impersonation token for this request only.
    Impersonated(String),
}

/// A request descriptor: everything needed to issue one HTTP call.
///
/// Facade methods build a `Request` from friendly parameters and hand it
/// to the executor (single-shot calls) or the paginator (listing calls).
/// Descriptors are constructed fresh per call and never shared.
#[derive(Debug, Clone)]
pub(crate) struct Request {
    method: Method,
    endpoint: String,
    query: Vec<(&'static str, String)>,
    body: Option<Value>,
    auth: AuthScope,
}

impl Request {
    fn new(method: Method, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            query: Vec::new(),
            body: None,
            auth: AuthScope::Standard,
        }
    }

    /// Creates a GET descriptor for the given endpoint path.
    pub(crate) fn get(endpoint: impl Into<String>) -> Self {
        Self::new(Method::GET, endpoint)
    }

    /// Creates a POST descriptor for the given endpoint path.
    pub(crate) fn post(endpoint: impl Into<String>) -> Self {
        Self::new(Method::POST, endpoint)
    }

    /// Creates a PUT descriptor for the given endpoint path.
    pub(crate) fn put(endpoint: impl Into<String>) -> Self {
        Self::new(Method::PUT, endpoint)
    }

    /// Creates a DELETE descriptor for the given endpoint path.
    pub(crate) fn delete(endpoint: impl Into<String>) -> Self {
        Self::new(Method::DELETE, endpoint)
    }

    /// Appends a query parameter.
    pub(crate) fn query(mut self, name: &'static str, value: impl ToString) -> Self {
        self.query.push((name, value.to_string()));
        self
    }

    /// Appends a query parameter when a value is present. Absent values
    /// are not sent at all, matching the API's treatment of omitted
    /// filters.
    pub(crate) fn query_opt(self, name: &'static str, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.query(name, value),
            None => self,
        }
    }

    /// Appends one query pair per value. List filters (tag IDs, question
    /// IDs, author IDs) are sent as repeated parameters and combined with
    /// OR logic by the server.
    pub(crate) fn query_each(mut self, name: &'static str, values: &[i64]) -> Self {
        for value in values {
            self.query.push((name, value.to_string()));
        }
        self
    }

    /// Sets the JSON request body.
    pub(crate) fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets the authentication scope for this request.
    pub(crate) fn auth(mut self, auth: AuthScope) -> Self {
        self.auth = auth;
        self
    }
}

/// The main HTTP client for the Stack Overflow for Teams API v3.
///
/// This client handles all HTTP communication with a Teams instance:
/// routing requests to the correct API root for the platform flavor,
/// applying the `Authorization: Bearer` header, paginating listing
/// endpoints, and mapping failures onto [`ApiError`].
///
/// # Creating a Client
///
/// ```rust,no_run
/// use stack_teams_api::StackClient;
///
/// // Business/Basic, addressed by team slug
/// let client = StackClient::new("https://stackoverflowteams.com/c/my-team", "token")?;
///
/// // Enterprise, with an impersonation key and a custom timeout
/// let client = StackClient::builder("https://teams.example.com", "token")
///     .key("service-key")
///     .timeout(std::time::Duration::from_secs(10))
///     .build()?;
/// # Ok::<(), stack_teams_api::ApiError>(())
/// ```
///
/// # Concurrency
///
/// The client issues requests strictly sequentially; each call completes
/// before the next is dispatched. All configuration is read-only after
/// construction, so sharing a client across tasks is safe, but the
/// library itself never parallelizes.
#[derive(Debug)]
pub struct StackClient {
    /// The underlying HTTP client.
    pub(crate) http: Client,
    /// Scheme + host of the instance (e.g. `https://teams.example.com`).
    pub(crate) base_url: String,
    /// Fully routed API v3 root for this instance.
    pub(crate) api_url: String,
    /// The platform flavor.
    pub(crate) platform: Platform,
    /// Access token and optional impersonation key.
    pub(crate) auth: Auth,
}

/// Builder for [`StackClient`].
///
/// Collects the optional pieces of client configuration before the HTTP
/// client is constructed. Obtained via [`StackClient::builder`].
///
/// # Example
///
/// ```rust,no_run
/// use stack_teams_api::StackClient;
///
/// let client = StackClient::builder("https://teams.example.com", "token")
///     .key("service-key")
///     .private_team("platform-guild")
///     .proxy("https://proxy.example.com:8080")
///     .build()?;
/// # Ok::<(), stack_teams_api::ApiError>(())
/// ```
pub struct StackClientBuilder {
    url: String,
    token: String,
    key: Option<String>,
    private_team: Option<String>,
    proxy: Option<String>,
    timeout: Duration,
    ssl_verify: bool,
}

impl StackClientBuilder {
    /// Sets the impersonation API key (Enterprise only).
    ///
    /// Required for [`acquire_impersonation_token`](StackClient::acquire_impersonation_token)
    /// and the `impersonate_*` methods.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Scopes the client to an Enterprise private team.
    ///
    /// The value is the URL slug of the private team: for
    /// `https://teams.example.com/c/secret-team`, pass `"secret-team"`.
    /// Ignored for Business/Basic instances, which are already
    /// team-scoped by their URL.
    pub fn private_team(mut self, slug: impl Into<String>) -> Self {
        self.private_team = Some(slug.into());
        self
    }

    /// Routes all requests through an HTTPS proxy.
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Overrides the default 30-second per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Disables TLS certificate verification.
    ///
    /// Only intended for Enterprise instances with self-signed
    /// certificates. Leave enabled everywhere else.
    pub fn danger_disable_ssl_verify(mut self) -> Self {
        self.ssl_verify = false;
        self
    }

    /// Builds the [`StackClient`].
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::BadUrl`] when the URL cannot be parsed or a
    /// Business URL is missing its `/c/<team>` slug, and
    /// [`ApiError::Transport`] when the HTTP client or proxy
    /// configuration is invalid.
    pub fn build(self) -> ApiResult<StackClient> {
        let (base_url, api_url, platform) = route_url(&self.url, self.private_team.as_deref())?;

        let mut builder = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(self.timeout);
        if let Some(proxy) = &self.proxy {
            builder = builder.proxy(reqwest::Proxy::https(proxy)?);
        }
        if !self.ssl_verify {
            builder = builder.danger_accept_invalid_certs(true);
        }

        let mut auth = Auth::new(self.token);
        if let Some(key) = self.key {
            auth = auth.with_key(key);
        }

        Ok(StackClient {
            http: builder.build()?,
            base_url,
            api_url,
            platform,
            auth,
        })
    }
}

/// Routes a user-supplied URL to (base URL, API v3 root, platform).
///
/// Business/Basic URLs carry the team slug in their path and are served
/// from the shared `api.stackoverflowteams.com` host; every other host is
/// treated as Enterprise and serves the API under its own `/api/v3`.
/// URLs without a scheme default to `https`; an explicit scheme is kept
/// as given.
fn route_url(
    url: &str,
    private_team: Option<&str>,
) -> ApiResult<(String, String, Platform)> {
    let parsed = Url::parse(url)
        .or_else(|_| Url::parse(&format!("https://{url}")))
        .map_err(|_| ApiError::BadUrl(url.to_string()))?;

    let host = parsed
        .host_str()
        .ok_or_else(|| ApiError::BadUrl(url.to_string()))?
        .to_string();

    let mut base_url = format!("{}://{}", parsed.scheme(), host);
    if let Some(port) = parsed.port() {
        base_url.push_str(&format!(":{port}"));
    }

    if host == TEAMS_DOMAIN || host.ends_with(&format!(".{TEAMS_DOMAIN}")) {
        // Business/Basic: the team slug lives in the /c/<slug> path.
        let team_slug = parsed
            .path_segments()
            .and_then(|mut segments| match (segments.next(), segments.next()) {
                (Some("c"), Some(slug)) if !slug.is_empty() => Some(slug.to_string()),
                _ => None,
            })
            .ok_or_else(|| ApiError::BadUrl(url.to_string()))?;

        let api_url = format!("{TEAMS_API_ROOT}/{team_slug}");
        Ok((base_url, api_url, Platform::Business { team_slug }))
    } else {
        let mut api_url = format!("{base_url}/api/v3");
        if let Some(team) = private_team {
            api_url.push_str(&format!("/teams/{team}"));
        }
        Ok((
            base_url,
            api_url,
            Platform::Enterprise {
                private_team: private_team.map(str::to_string),
            },
        ))
    }
}

impl StackClient {
    /// Creates a client with default settings.
    ///
    /// Equivalent to `StackClient::builder(url, token).build()`.
    ///
    /// # Parameters
    ///
    /// * `url` - The instance URL: `https://stackoverflowteams.com/c/<team>`
    ///   for Business/Basic, or the Enterprise host
    /// * `token` - A personal or service access token for the instance
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::BadUrl`] when the URL cannot be routed.
    pub fn new(url: impl Into<String>, token: impl Into<String>) -> ApiResult<Self> {
        Self::builder(url, token).build()
    }

    /// Starts building a client with custom settings.
    pub fn builder(url: impl Into<String>, token: impl Into<String>) -> StackClientBuilder {
        StackClientBuilder {
            url: url.into(),
            token: token.into(),
            key: None,
            private_team: None,
            proxy: None,
            timeout: DEFAULT_TIMEOUT,
            ssl_verify: true,
        }
    }

    /// Returns the scheme + host of the configured instance.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the fully routed API v3 root used for requests.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Returns the platform flavor of the configured instance.
    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    /// Checks if the configured instance is Stack Overflow Enterprise.
    pub fn is_enterprise(&self) -> bool {
        matches!(self.platform, Platform::Enterprise { .. })
    }

    /// Dispatches a request descriptor and returns the raw response.
    ///
    /// Applies the authentication scope, query parameters, and JSON body
    /// from the descriptor. Non-success statuses are mapped onto
    /// [`ApiError`] before the response is handed back.
    pub(crate) async fn send(&self, request: &Request) -> ApiResult<reqwest::Response> {
        let url = format!("{}{}", self.api_url, request.endpoint);
        let mut builder = self.http.request(request.method.clone(), &url);

        builder = match &request.auth {
            AuthScope::Standard => self.auth.apply_to_request(builder),
            AuthScope::Impersonated(token) => builder.bearer_auth(token),
        };
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        debug!(method = %request.method, %url, "dispatching API request");
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(classify_status(status, body))
    }

    /// Executes a single-shot request and decodes the JSON response.
    pub(crate) async fn fetch_one<T: DeserializeOwned>(&self, request: Request) -> ApiResult<T> {
        let response = self.send(&request).await?;
        decode_json(response).await
    }

    /// Executes a request where no response body is expected (deletes).
    pub(crate) async fn execute(&self, request: Request) -> ApiResult<()> {
        self.send(&request).await.map(|_| ())
    }

    /// Fetches every page of a listing endpoint and aggregates the items.
    ///
    /// Starting at `first_page`, requests successive pages with
    /// `page`/`pageSize` query parameters until the envelope reports the
    /// last page or a page returns fewer items than requested, appending
    /// each page's items in order. With `one_page_limit`, exactly one
    /// page is fetched.
    ///
    /// An empty first page yields an empty `Vec`, not an error.
    pub(crate) async fn fetch_all<T: DeserializeOwned>(
        &self,
        base: Request,
        first_page: u32,
        page_size: u32,
        one_page_limit: bool,
    ) -> ApiResult<Vec<T>> {
        let mut items = Vec::new();
        let mut page = first_page.max(1);

        loop {
            let request = base
                .clone()
                .query("page", page)
                .query("pageSize", page_size);
            let response = self.send(&request).await?;
            let envelope: PaginatedResponse<T> = decode_json(response).await?;

            let received = envelope.items.len();
            let last_page = envelope.is_last_page();
            items.extend(envelope.items);
            debug!(
                endpoint = %base.endpoint,
                page,
                received,
                total = envelope.total_count,
                "received page"
            );

            if one_page_limit || last_page || (received as u32) < page_size {
                break;
            }
            page += 1;
        }

        Ok(items)
    }
}

/// Maps a non-success HTTP response onto an [`ApiError`].
///
/// A 401 means the access token is missing or invalid and becomes
/// [`ApiError::Auth`]; everything else carries its exact status code and
/// body through [`ApiError::Http`]. Notably, 429 is surfaced as-is: the
/// library never waits out the rate limiter on the caller's behalf.
fn classify_status(status: StatusCode, body: String) -> ApiError {
    match status {
        StatusCode::UNAUTHORIZED => ApiError::Auth(if body.is_empty() {
            "invalid or missing access token".to_string()
        } else {
            body
        }),
        _ => ApiError::Http {
            status: status.as_u16(),
            body,
        },
    }
}

/// Reads the response body and decodes it as JSON.
async fn decode_json<T: DeserializeOwned>(response: reqwest::Response) -> ApiResult<T> {
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_business_url() {
        let (base, api, platform) =
            route_url("https://stackoverflowteams.com/c/my-team", None).unwrap();
        assert_eq!(base, "https://stackoverflowteams.com");
        assert_eq!(
            api,
            "https://api.stackoverflowteams.com/v3/teams/my-team"
        );
        assert_eq!(
            platform,
            Platform::Business {
                team_slug: "my-team".to_string()
            }
        );
    }

    #[test]
    fn test_route_business_url_without_slug_fails() {
        let err = route_url("https://stackoverflowteams.com", None).unwrap_err();
        assert!(matches!(err, ApiError::BadUrl(_)));
    }

    #[test]
    fn test_route_enterprise_url() {
        let (base, api, platform) = route_url("https://teams.example.com", None).unwrap();
        assert_eq!(base, "https://teams.example.com");
        assert_eq!(api, "https://teams.example.com/api/v3");
        assert_eq!(
            platform,
            Platform::Enterprise { private_team: None }
        );
    }

    #[test]
    fn test_route_enterprise_private_team() {
        let (_, api, platform) =
            route_url("https://teams.example.com", Some("secret-team")).unwrap();
        assert_eq!(api, "https://teams.example.com/api/v3/teams/secret-team");
        assert_eq!(
            platform,
            Platform::Enterprise {
                private_team: Some("secret-team".to_string())
            }
        );
    }

    #[test]
    fn test_route_defaults_to_https() {
        let (base, _, _) = route_url("teams.example.com", None).unwrap();
        assert_eq!(base, "https://teams.example.com");
    }

    #[test]
    fn test_route_keeps_explicit_scheme_and_port() {
        let (base, api, _) = route_url("http://127.0.0.1:9090", None).unwrap();
        assert_eq!(base, "http://127.0.0.1:9090");
        assert_eq!(api, "http://127.0.0.1:9090/api/v3");
    }

    #[test]
    fn test_classify_unauthorized() {
        let err = classify_status(StatusCode::UNAUTHORIZED, String::new());
        assert!(matches!(err, ApiError::Auth(_)));
    }

    #[test]
    fn test_classify_other_statuses_carry_body() {
        for code in [400u16, 403, 404, 429, 500] {
            let status = StatusCode::from_u16(code).unwrap();
            match classify_status(status, "problem".to_string()) {
                ApiError::Http { status, body } => {
                    assert_eq!(status, code);
                    assert_eq!(body, "problem");
                }
                other => panic!("unexpected error for {code}: {other:?}"),
            }
        }
    }

    #[test]
    fn test_request_query_helpers() {
        let request = Request::get("/questions")
            .query("sort", "creation")
            .query_opt("authorId", Some(7))
            .query_opt("isAnswered", None::<bool>)
            .query_each("tagId", &[1, 2]);
        assert_eq!(
            request.query,
            vec![
                ("sort", "creation".to_string()),
                ("authorId", "7".to_string()),
                ("tagId", "1".to_string()),
                ("tagId", "2".to_string()),
            ]
        );
    }
}
