//
//  stack-teams-api
//  api/common/pagination.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/10.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Pagination Types for Teams API v3 Responses
//!
//! Every listing endpoint of the Teams API wraps its results in the same
//! page envelope: an `items` array plus page metadata. This module models
//! that envelope and the rules for deciding whether another page exists.
//!
//! # Overview
//!
//! The Teams API uses page-number pagination: the client requests
//! `page=N&pageSize=M` and the server replies with
//!
//! ```json
//! {
//!     "totalCount": 5,
//!     "pageSize": 2,
//!     "page": 1,
//!     "totalPages": 3,
//!     "sort": "creation",
//!     "order": "asc",
//!     "items": [ ... ]
//! }
//! ```
//!
//! Iteration stops when the current page number reaches `totalPages`, or
//! when a page comes back with fewer items than were requested. Both
//! signals are treated as equally authoritative; the paginator stops on
//! whichever fires first.
//!
//! # Example
//!
//! ```rust
//! use stack_teams_api::api::common::PaginatedResponse;
//! use serde::Deserialize;
//!
//! #[derive(Clone, Deserialize)]
//! struct Tag {
//!     id: i64,
//!     name: String,
//! }
//!
//! let json = r#"{
//!     "totalCount": 1,
//!     "pageSize": 100,
//!     "page": 1,
//!     "totalPages": 1,
//!     "items": [{"id": 7, "name": "rust"}]
//! }"#;
//!
//! let page: PaginatedResponse<Tag> = serde_json::from_str(json).unwrap();
//! assert_eq!(page.items.len(), 1);
//! assert!(page.is_last_page());
//! ```
//!
//! # Notes
//!
//! - Metadata fields default to zero when absent, which makes a malformed
//!   or truncated envelope terminate pagination instead of looping
//! - The `items` field is always present in well-formed responses, even
//!   when empty

use serde::{Deserialize, Serialize};

/// Default number of items requested per page when the caller does not
/// specify one. The API accepts 15, 30, 50, or 100; anything else is
/// passed through untouched and validated by the remote service.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// A single page of results from a Teams API v3 listing endpoint.
///
/// # Type Parameters
///
/// - `T` - The type of items contained in the `items` array
///
/// # Fields
///
/// | Field | JSON name | Description |
/// |-------|-----------|-------------|
/// | `items` | `items` | Items in the current page, in server order |
/// | `total_count` | `totalCount` | Total items across all pages |
/// | `page` | `page` | Current page number (1-indexed) |
/// | `page_size` | `pageSize` | Requested items per page |
/// | `total_pages` | `totalPages` | Total number of pages |
/// | `sort` | `sort` | Sort field echoed by the server |
/// | `order` | `order` | Sort order echoed by the server |
///
/// # Notes
///
/// - Page numbers are 1-indexed (the first page is page 1)
/// - The envelope is transient: the paginator consumes `items` and
///   discards the metadata once the continuation decision is made
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    /// Items in the current page, in the order assigned by the server.
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,

    /// Total number of items across all pages.
    #[serde(default, rename = "totalCount")]
    pub total_count: u64,

    /// Current page number (1-indexed).
    #[serde(default)]
    pub page: u32,

    /// Number of items requested per page. The final page may hold fewer.
    #[serde(default, rename = "pageSize")]
    pub page_size: u32,

    /// Total number of pages for the query.
    #[serde(default, rename = "totalPages")]
    pub total_pages: u32,

    /// Sort field echoed back by the server, when present.
    #[serde(default)]
    pub sort: Option<String>,

    /// Sort order echoed back by the server, when present.
    #[serde(default)]
    pub order: Option<String>,
}

impl<T> PaginatedResponse<T> {
    /// Checks whether this is the final page of the result set.
    ///
    /// Returns `true` when the current page number has reached
    /// `total_pages`. An envelope without metadata (both fields zero)
    /// also reports `true`, so pagination cannot loop on a response that
    /// never announces further pages.
    pub fn is_last_page(&self) -> bool {
        self.page >= self.total_pages
    }

    /// Checks whether more pages of results are available.
    ///
    /// The inverse of [`is_last_page()`](Self::is_last_page).
    pub fn has_next(&self) -> bool {
        !self.is_last_page()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct Item {
        id: i64,
    }

    #[test]
    fn test_parse_full_envelope() {
        let json = r#"{
            "totalCount": 5,
            "pageSize": 2,
            "page": 1,
            "totalPages": 3,
            "sort": "creation",
            "order": "asc",
            "items": [{"id": 1}, {"id": 2}]
        }"#;
        let page: PaginatedResponse<Item> = serde_json::from_str(json).unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total_count, 5);
        assert_eq!(page.total_pages, 3);
        assert!(page.has_next());
    }

    #[test]
    fn test_last_page() {
        let json = r#"{"totalCount": 5, "pageSize": 2, "page": 3, "totalPages": 3, "items": [{"id": 5}]}"#;
        let page: PaginatedResponse<Item> = serde_json::from_str(json).unwrap();
        assert!(page.is_last_page());
    }

    #[test]
    fn test_missing_metadata_terminates() {
        // A bare items array must not keep pagination running.
        let json = r#"{"items": []}"#;
        let page: PaginatedResponse<Item> = serde_json::from_str(json).unwrap();
        assert!(page.is_last_page());
        assert!(page.items.is_empty());
    }
}
