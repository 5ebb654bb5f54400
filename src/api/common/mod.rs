//
//  stack-teams-api
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/10.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Common API Types for Stack Overflow for Teams
//!
//! This module provides shared types used across every resource of the
//! Teams API v3 binding: the unified error type, the pagination envelope,
//! and the sort-order parameter shared by all listing endpoints.
//!
//! # Overview
//!
//! - [`ApiError`] - Unified error type for all API operations
//! - [`ApiResult`] - Convenience alias for `Result<T, ApiError>`
//! - [`SortOrder`] - Ascending/descending parameter for listing calls
//! - Pagination types (re-exported from the [`pagination`] submodule)
//!
//! # Example
//!
//! ```rust
//! use stack_teams_api::api::common::{ApiError, ApiResult};
//!
//! fn handle_result<T>(result: ApiResult<T>) {
//!     match result {
//!         Ok(_) => println!("Success!"),
//!         Err(ApiError::Auth(reason)) => println!("Check your token: {}", reason),
//!         Err(ApiError::Http { status, .. }) => println!("API rejected the call: {}", status),
//!         Err(e) => println!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Notes
//!
//! - All types implement `Debug` for easy inspection
//! - Serialization/deserialization is handled via `serde` for JSON compatibility
//! - The library never retries: every error surfaces to the caller immediately

use thiserror::Error;

mod pagination;

pub use pagination::*;

/// Convenience alias for results returned by this library.
///
/// Every fallible operation in the crate returns `ApiResult<T>`, which is
/// `Result<T, ApiError>`. Use the `?` operator for ergonomic propagation.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Unified error type for all Stack Overflow for Teams API operations.
///
/// `ApiError` covers the failure scenarios a thin HTTP binding can
/// encounter. It implements the standard `Error` trait via `thiserror`
/// for ergonomic error handling.
///
/// # Variants
///
/// | Variant | Description | Typical trigger |
/// |---------|-------------|-----------------|
/// | `Transport` | Connection, DNS, TLS, or timeout failure | network layer |
/// | `Http` | Non-2xx response, with exact status and body | remote service |
/// | `Decode` | Response body was not the expected JSON | remote service |
/// | `Auth` | Missing/invalid token or impersonation problem | 401, token exchange |
/// | `NotFound` | A client-side lookup matched nothing | `get_tag_by_name` |
/// | `BadUrl` | The configured base URL could not be understood | construction |
///
/// # Example
///
/// ```rust
/// use stack_teams_api::api::common::ApiError;
///
/// let err = ApiError::Http { status: 404, body: "{\"title\":\"Question not found.\"}".to_string() };
/// assert_eq!(err.status(), Some(404));
/// ```
///
/// # Notes
///
/// - The `Transport` variant automatically converts from `reqwest::Error`
/// - An HTTP 404 from the server surfaces as `Http { status: 404, .. }`;
///   `NotFound` is reserved for lookups the client itself performs
/// - There is no retry or recovery anywhere in the library; resilience
///   decisions belong to the calling application
#[derive(Error, Debug)]
pub enum ApiError {
    /// A network-level error occurred during the request.
    ///
    /// Covers connection failures, DNS resolution errors, TLS problems,
    /// and the per-request timeout applied by the client.
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The remote service responded with a non-success status code.
    ///
    /// Carries the exact status code and the raw response body so callers
    /// can inspect the API's problem-details payload.
    #[error("HTTP {status}: {body}")]
    Http {
        /// The HTTP status code returned by the server.
        status: u16,
        /// The raw response body, usually a JSON problem-details document.
        body: String,
    },

    /// The response body was not valid JSON, or not the expected shape,
    /// when JSON was expected.
    #[error("failed to decode API response: {0}")]
    Decode(String),

    /// Authentication failed.
    ///
    /// Raised for HTTP 401 responses, for impersonation attempts without
    /// an API key or against a non-Enterprise instance, and for the
    /// impersonation-disabled responses of the token exchange endpoint.
    #[error("authentication error: {0}")]
    Auth(String),

    /// A client-side lookup matched nothing.
    ///
    /// Only produced by convenience lookups that filter results locally,
    /// such as resolving a tag by its exact name.
    #[error("not found: {0}")]
    NotFound(String),

    /// The configured base URL could not be parsed or routed.
    #[error("bad URL: {0}. Please fix the URL and try again.")]
    BadUrl(String),
}

impl ApiError {
    /// Returns the HTTP status code carried by this error, if any.
    ///
    /// Only the `Http` variant carries a status code; every other variant
    /// returns `None`.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Sort direction for listing endpoints.
///
/// Every listing endpoint of the Teams API accepts an `order` query
/// parameter with the values `asc` or `desc`. The per-resource default
/// differs (questions default to ascending, users to descending) and is
/// applied by the facade method when no order is given.
///
/// # Example
///
/// ```rust
/// use stack_teams_api::api::common::SortOrder;
///
/// assert_eq!(SortOrder::Asc.as_param(), "asc");
/// assert_eq!(SortOrder::Desc.as_param(), "desc");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Ascending order (`asc`).
    Asc,
    /// Descending order (`desc`).
    Desc,
}

impl SortOrder {
    /// Returns the query-string value for this order.
    pub fn as_param(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status() {
        let err = ApiError::Http {
            status: 404,
            body: "missing".to_string(),
        };
        assert_eq!(err.status(), Some(404));
        assert_eq!(ApiError::Auth("no token".to_string()).status(), None);
    }

    #[test]
    fn test_error_display_carries_body() {
        let err = ApiError::Http {
            status: 400,
            body: "{\"title\":\"Question not created\"}".to_string(),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("400"));
        assert!(rendered.contains("Question not created"));
    }

    #[test]
    fn test_sort_order_params() {
        assert_eq!(SortOrder::Asc.as_param(), "asc");
        assert_eq!(SortOrder::Desc.as_param(), "desc");
    }
}
