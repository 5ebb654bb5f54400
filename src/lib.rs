//
//  stack-teams-api
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/10.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Stack Overflow for Teams API Library
//!
//! A typed, async client for the Stack Overflow for Teams REST API v3,
//! covering questions, answers, articles, tags and subject matter
//! experts, users, user groups, communities, collections, search, and
//! user impersonation.
//!
//! ## Overview
//!
//! The central type is [`StackClient`]: construct one from an instance
//! URL and an access token, then call its resource methods. Listing
//! methods transparently page through every result; composite methods
//! stitch related resources (answers onto questions, SMEs onto tags)
//! into a single return value.
//!
//! ```rust,no_run
//! use stack_teams_api::StackClient;
//!
//! # async fn example() -> Result<(), stack_teams_api::ApiError> {
//! let client = StackClient::new("https://stackoverflowteams.com/c/my-team", "token")?;
//!
//! let questions = client.get_questions(&Default::default()).await?;
//! println!("{} questions on the instance", questions.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Platform Support
//!
//! | Feature | Business/Basic | Enterprise |
//! |---------|----------------|------------|
//! | API v3 resources | Yes | Yes |
//! | Private team scoping | N/A | Yes |
//! | User impersonation | No | Yes (opt-in) |
//!
//! ## Module Structure
//!
//! - [`api`]: The client, shared types, and one module per resource
//! - [`auth`]: Session credentials and the impersonation token exchange
//!
//! ## Error Handling
//!
//! Every method returns [`ApiResult`], with [`ApiError`] distinguishing
//! transport failures, non-success HTTP responses (carrying the exact
//! status and body), decode failures, and authentication problems. The
//! library never retries and never swallows a failure; resilience
//! policy belongs to the caller.

/// API client implementation for Stack Overflow for Teams.
///
/// Contains the HTTP client with platform routing and pagination, plus
/// one module per API v3 resource defining its types and facade
/// methods.
pub mod api;

/// Authentication and the impersonation token exchange.
///
/// Holds the bearer access token applied to every request and, on
/// Enterprise instances, the API-key-based exchange that produces
/// short-lived impersonation tokens.
pub mod auth;

/// Re-export of the main client type.
///
/// # Example
///
/// ```rust,no_run
/// use stack_teams_api::StackClient;
///
/// let client = StackClient::new("https://teams.example.com", "token")?;
/// # Ok::<(), stack_teams_api::ApiError>(())
/// ```
pub use api::client::StackClient;

/// Re-export of the client builder, for custom timeouts, proxies,
/// private teams, and impersonation keys.
pub use api::client::StackClientBuilder;

/// Re-export of the platform flavor enum.
pub use api::client::Platform;

/// Re-export of the library error type.
pub use api::common::ApiError;

/// Re-export of the library result alias.
pub use api::common::ApiResult;

/// Re-export of the pagination envelope.
pub use api::common::PaginatedResponse;

/// Re-export of the sort-order parameter shared by listing endpoints.
pub use api::common::SortOrder;

/// Library version, derived from Cargo.toml at compile time.
///
/// # Example
///
/// ```rust
/// use stack_teams_api::VERSION;
///
/// println!("stack-teams-api {}", VERSION);
/// ```
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
