//
//  stack-teams-api
//  api/users.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/10.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! User API types and methods.
//!
//! Users are referenced by almost every other resource (owners, editors,
//! SMEs), so this module also defines the lightweight [`UserSummary`]
//! embedded in those responses.
//!
//! # Notes
//!
//! - `get_user_by_email` and `get_account_id_by_email` require admin
//!   permissions; only admins can see email addresses through the API
//! - Account IDs (not user IDs) are the currency of impersonation and
//!   SCIM; the `get_account_id_by_*` helpers bridge the two

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::api::client::{AuthScope, Request};
use crate::api::common::{ApiError, ApiResult, SortOrder, DEFAULT_PAGE_SIZE};
use crate::StackClient;

/// A lightweight user reference embedded in other resources.
///
/// Owners, editors, and subject matter experts are all reported in this
/// shape. Fields not modeled here are preserved in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    /// Unique identifier of the user on this instance.
    pub id: i64,

    /// Site-wide account identifier, used for impersonation and SCIM.
    #[serde(default)]
    pub account_id: Option<i64>,

    /// Display name of the user.
    #[serde(default)]
    pub name: Option<String>,

    /// URL of the user's avatar image.
    #[serde(default)]
    pub avatar_url: Option<String>,

    /// URL of the user's profile page.
    #[serde(default)]
    pub web_url: Option<String>,

    /// Reputation earned on this instance.
    #[serde(default)]
    pub reputation: i64,

    /// Role of the user (`Registered`, `Moderator`, ...).
    #[serde(default)]
    pub role: Option<String>,

    /// Fields returned by the API but not explicitly modeled.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A full user record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier of the user on this instance.
    pub id: i64,

    /// Site-wide account identifier, used for impersonation and SCIM.
    #[serde(default)]
    pub account_id: Option<i64>,

    /// Display name of the user.
    #[serde(default)]
    pub name: Option<String>,

    /// Email address; only visible to admins.
    #[serde(default)]
    pub email: Option<String>,

    /// URL of the user's avatar image.
    #[serde(default)]
    pub avatar_url: Option<String>,

    /// URL of the user's profile page.
    #[serde(default)]
    pub web_url: Option<String>,

    /// Reputation earned on this instance.
    #[serde(default)]
    pub reputation: i64,

    /// Role of the user (`Registered`, `Moderator`, ...).
    #[serde(default)]
    pub role: Option<String>,

    /// Department, when populated from the user directory.
    #[serde(default)]
    pub department: Option<String>,

    /// Job title, when populated from the user directory.
    #[serde(default)]
    pub job_title: Option<String>,

    /// External directory identifier, when provisioned via SCIM.
    #[serde(default)]
    pub external_id: Option<String>,

    /// Fields returned by the API but not explicitly modeled.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Sort field for user listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserSort {
    /// Sort by reputation (the server default).
    Reputation,
    /// Sort by account creation date.
    Creation,
}

impl UserSort {
    /// Returns the query-string value for this sort field.
    pub fn as_param(&self) -> &'static str {
        match self {
            Self::Reputation => "reputation",
            Self::Creation => "creation",
        }
    }
}

/// Filters for [`StackClient::get_users`].
///
/// The default query lists every user, sorted by reputation in
/// descending order.
#[derive(Debug, Clone, Default)]
pub struct UserQuery {
    /// First page to fetch. Defaults to 1.
    pub page: Option<u32>,
    /// Items per page. The API accepts 15, 30, 50, or 100; defaults to 100.
    pub page_size: Option<u32>,
    /// Sort field. Defaults to reputation.
    pub sort: Option<UserSort>,
    /// Sort order. Defaults to descending.
    pub order: Option<SortOrder>,
    /// Fetch a single page instead of paging through all results.
    pub one_page_limit: bool,
}

impl StackClient {
    /// Retrieves users, paging through all results.
    ///
    /// # Parameters
    ///
    /// * `query` - Filters, sorting, and paging controls; `&Default::default()`
    ///   lists every user
    pub async fn get_users(&self, query: &UserQuery) -> ApiResult<Vec<User>> {
        let request = Request::get("/users")
            .query("sort", query.sort.unwrap_or(UserSort::Reputation).as_param())
            .query("order", query.order.unwrap_or(SortOrder::Desc).as_param());
        self.fetch_all(
            request,
            query.page.unwrap_or(1),
            query.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            query.one_page_limit,
        )
        .await
    }

    /// Retrieves a user by their ID.
    pub async fn get_user_by_id(&self, user_id: i64) -> ApiResult<User> {
        self.fetch_one(Request::get(format!("/users/{user_id}"))).await
    }

    /// Retrieves a user by their email address.
    ///
    /// Requires admin permissions. The comparison is not case-sensitive.
    pub async fn get_user_by_email(&self, email: &str) -> ApiResult<User> {
        self.fetch_one(Request::get(format!("/users/by-email/{email}")))
            .await
    }

    /// Retrieves the authenticated user.
    pub async fn get_myself(&self) -> ApiResult<User> {
        self.get_myself_with_scope(AuthScope::Standard).await
    }

    /// Retrieves `/users/me` under the given authentication scope.
    pub(crate) async fn get_myself_with_scope(&self, scope: AuthScope) -> ApiResult<User> {
        self.fetch_one(Request::get("/users/me").auth(scope)).await
    }

    /// Resolves a user ID to the account ID needed for impersonation and
    /// SCIM.
    pub async fn get_account_id_by_user_id(&self, user_id: i64) -> ApiResult<i64> {
        let user = self.get_user_by_id(user_id).await?;
        account_id_of(&user)
    }

    /// Resolves an email address to the account ID needed for
    /// impersonation and SCIM.
    ///
    /// Requires admin permissions. The email comparison is not
    /// case-sensitive.
    pub async fn get_account_id_by_email(&self, email: &str) -> ApiResult<i64> {
        let user = self.get_user_by_email(email).await?;
        account_id_of(&user)
    }
}

fn account_id_of(user: &User) -> ApiResult<i64> {
    user.account_id.ok_or_else(|| {
        ApiError::Decode(format!("user {} has no accountId field", user.id))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user_keeps_unmodeled_fields() {
        let json = r#"{
            "id": 12,
            "accountId": 34,
            "name": "Jo Dev",
            "reputation": 101,
            "role": "Moderator",
            "communities": [{"id": 1}]
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, 12);
        assert_eq!(user.account_id, Some(34));
        assert!(user.extra.contains_key("communities"));
    }

    #[test]
    fn test_account_id_missing_is_decode_error() {
        let user: User = serde_json::from_str(r#"{"id": 5}"#).unwrap();
        assert!(matches!(
            account_id_of(&user),
            Err(ApiError::Decode(_))
        ));
    }
}
