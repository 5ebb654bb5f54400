//
//  stack-teams-api
//  api/communities.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/10.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Community API types and methods.
//!
//! Communities are opt-in membership spaces inside a Teams instance.
//! The API exposes listings plus join/leave for the calling user and
//! bulk membership changes for admins; communities themselves are
//! created through the site, not the API.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::api::client::Request;
use crate::api::common::{ApiResult, SortOrder, DEFAULT_PAGE_SIZE};
use crate::StackClient;

/// A community on the instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Community {
    /// Unique identifier of the community.
    pub id: i64,

    /// Name of the community.
    #[serde(default)]
    pub name: Option<String>,

    /// Free-text description of the community.
    #[serde(default)]
    pub description: Option<String>,

    /// Number of members.
    #[serde(default)]
    pub member_count: i64,

    /// Tags associated with the community.
    #[serde(default)]
    pub tags: Vec<Value>,

    /// Fields returned by the API but not explicitly modeled.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Sort field for community listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommunitySort {
    /// Sort by community name (the server default).
    Name,
    /// Sort by number of members.
    Size,
}

impl CommunitySort {
    /// Returns the query-string value for this sort field.
    pub fn as_param(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Size => "size",
        }
    }
}

/// Filters for [`StackClient::get_communities`].
#[derive(Debug, Clone, Default)]
pub struct CommunityQuery {
    /// First page to fetch. Defaults to 1.
    pub page: Option<u32>,
    /// Items per page. The API accepts 15, 30, 50, or 100; defaults to 100.
    pub page_size: Option<u32>,
    /// Sort field. Defaults to name.
    pub sort: Option<CommunitySort>,
    /// Sort order. Defaults to ascending.
    pub order: Option<SortOrder>,
    /// Fetch a single page instead of paging through all results.
    pub one_page_limit: bool,
}

impl StackClient {
    /// Retrieves communities, paging through all results.
    pub async fn get_communities(&self, query: &CommunityQuery) -> ApiResult<Vec<Community>> {
        let request = Request::get("/communities")
            .query("sort", query.sort.unwrap_or(CommunitySort::Name).as_param())
            .query("order", query.order.unwrap_or(SortOrder::Asc).as_param());
        self.fetch_all(
            request,
            query.page.unwrap_or(1),
            query.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            query.one_page_limit,
        )
        .await
    }

    /// Retrieves a community by its ID.
    pub async fn get_community_by_id(&self, community_id: i64) -> ApiResult<Community> {
        self.fetch_one(Request::get(format!("/communities/{community_id}")))
            .await
    }

    /// Joins the authenticated user to a community.
    pub async fn join_community(&self, community_id: i64) -> ApiResult<Community> {
        self.fetch_one(Request::post(format!("/communities/{community_id}/join")))
            .await
    }

    /// Removes the authenticated user from a community.
    pub async fn leave_community(&self, community_id: i64) -> ApiResult<Community> {
        self.fetch_one(Request::post(format!("/communities/{community_id}/leave")))
            .await
    }

    /// Adds users to a community in bulk. Requires admin permissions.
    pub async fn add_users_to_community(
        &self,
        community_id: i64,
        user_ids: &[i64],
    ) -> ApiResult<Community> {
        let request = Request::post(format!("/communities/{community_id}/join/bulk"))
            .body(json!({ "memberUserIds": user_ids }));
        self.fetch_one(request).await
    }

    /// Removes users from a community in bulk. Requires admin
    /// permissions.
    pub async fn remove_users_from_community(
        &self,
        community_id: i64,
        user_ids: &[i64],
    ) -> ApiResult<Community> {
        let request = Request::post(format!("/communities/{community_id}/leave/bulk"))
            .body(json!({ "memberUserIds": user_ids }));
        self.fetch_one(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_community() {
        let json = r#"{
            "id": 3,
            "name": "Platform Engineering",
            "description": "All things infra",
            "memberCount": 120
        }"#;
        let community: Community = serde_json::from_str(json).unwrap();
        assert_eq!(community.name.as_deref(), Some("Platform Engineering"));
        assert_eq!(community.member_count, 120);
    }

    #[test]
    fn test_sort_params() {
        assert_eq!(CommunitySort::Name.as_param(), "name");
        assert_eq!(CommunitySort::Size.as_param(), "size");
    }
}
