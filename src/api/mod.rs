//
//  stack-teams-api
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/10.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Stack Overflow for Teams API v3 Client
//!
//! This module contains the HTTP client and the per-resource API
//! surface for Stack Overflow for Teams.
//!
//! ## Structure
//!
//! - [`client`]: The [`StackClient`](client::StackClient), platform
//!   routing, and the request executor/paginator
//! - [`common`]: Shared types (errors, pagination envelope, sort order)
//! - One module per resource, each defining its types, query structs,
//!   and the facade methods on `StackClient`
//!
//! ## Resources
//!
//! | Module | Endpoints |
//! |--------|-----------|
//! | [`questions`] | `/questions`, question comments, composites |
//! | [`answers`] | `/questions/{id}/answers`, answer comments |
//! | [`articles`] | `/articles` |
//! | [`tags`] | `/tags`, subject matter experts |
//! | [`users`] | `/users`, `/users/me` |
//! | [`user_groups`] | `/user-groups` |
//! | [`communities`] | `/communities` |
//! | [`collections`] | `/collections` |
//! | [`search`] | `/search` |
//! | [`impersonation`] | Impersonated writes (Enterprise only) |

/// Shared API types: errors, pagination, sort order.
pub mod common;

/// The HTTP client, platform routing, and request plumbing.
pub mod client;

/// Question endpoints and the question/answer/comment composites.
pub mod questions;

/// Answer endpoints, keyed by question.
pub mod answers;

/// Article endpoints and the article permission model.
pub mod articles;

/// Tag endpoints and subject-matter-expert management.
pub mod tags;

/// User endpoints and account-ID resolution.
pub mod users;

/// User group endpoints.
pub mod user_groups;

/// Community endpoints.
pub mod communities;

/// Collection endpoints.
pub mod collections;

/// Full-text search.
pub mod search;

/// Impersonated operations (Enterprise only).
pub mod impersonation;
