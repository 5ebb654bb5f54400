//
//  stack-teams-api
//  api/user_groups.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/10.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! User group API types and methods.
//!
//! User groups collect users for bulk assignment: as subject matter
//! experts on tags, or as editors of articles and collections. Editing a
//! group is read-modify-write on the client side, because the PUT
//! endpoint replaces every field of the group.
//!
//! # Notes
//!
//! - Adding members appends to the existing membership; removing a member
//!   deletes a single user from the group
//! - Group names must be unique on the instance

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::api::client::Request;
use crate::api::common::{ApiResult, SortOrder, DEFAULT_PAGE_SIZE};
use crate::api::users::UserSummary;
use crate::StackClient;

/// A lightweight user group reference embedded in other resources.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserGroupSummary {
    /// Unique identifier of the group.
    pub id: i64,

    /// Name of the group.
    #[serde(default)]
    pub name: Option<String>,

    /// Fields returned by the API but not explicitly modeled.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A full user group record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserGroup {
    /// Unique identifier of the group.
    pub id: i64,

    /// Name of the group.
    #[serde(default)]
    pub name: Option<String>,

    /// Free-text description of the group.
    #[serde(default)]
    pub description: Option<String>,

    /// The members of the group.
    #[serde(default)]
    pub users: Vec<UserSummary>,

    /// Fields returned by the API but not explicitly modeled.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserGroup {
    /// Returns the user IDs of the group members.
    pub fn member_ids(&self) -> Vec<i64> {
        self.users.iter().map(|u| u.id).collect()
    }
}

/// Sort field for user group listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserGroupSort {
    /// Sort by group name (the server default).
    Name,
    /// Sort by number of members.
    Size,
}

impl UserGroupSort {
    /// Returns the query-string value for this sort field.
    pub fn as_param(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Size => "size",
        }
    }
}

/// Filters for [`StackClient::get_user_groups`].
#[derive(Debug, Clone, Default)]
pub struct UserGroupQuery {
    /// First page to fetch. Defaults to 1.
    pub page: Option<u32>,
    /// Items per page. The API accepts 15, 30, 50, or 100; defaults to 100.
    pub page_size: Option<u32>,
    /// Sort field. Defaults to name.
    pub sort: Option<UserGroupSort>,
    /// Sort order. Defaults to descending.
    pub order: Option<SortOrder>,
    /// Fetch a single page instead of paging through all results.
    pub one_page_limit: bool,
}

impl StackClient {
    /// Retrieves user groups, paging through all results.
    pub async fn get_user_groups(&self, query: &UserGroupQuery) -> ApiResult<Vec<UserGroup>> {
        let request = Request::get("/user-groups")
            .query("sort", query.sort.unwrap_or(UserGroupSort::Name).as_param())
            .query("order", query.order.unwrap_or(SortOrder::Desc).as_param());
        self.fetch_all(
            request,
            query.page.unwrap_or(1),
            query.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            query.one_page_limit,
        )
        .await
    }

    /// Retrieves a user group by its ID.
    pub async fn get_user_group_by_id(&self, group_id: i64) -> ApiResult<UserGroup> {
        self.fetch_one(Request::get(format!("/user-groups/{group_id}")))
            .await
    }

    /// Creates a new user group.
    ///
    /// # Parameters
    ///
    /// * `name` - Name of the group; must be unique on the instance
    /// * `user_ids` - Initial members of the group
    /// * `description` - Optional free-text description
    pub async fn add_user_group(
        &self,
        name: &str,
        user_ids: &[i64],
        description: Option<&str>,
    ) -> ApiResult<UserGroup> {
        let request = Request::post("/user-groups").body(json!({
            "name": name,
            "userIds": user_ids,
            "description": description.unwrap_or(""),
        }));
        self.fetch_one(request).await
    }

    /// Edits a user group.
    ///
    /// The PUT endpoint replaces every field of the group, so any argument
    /// left as `None` is backfilled from the group's current state before
    /// the update is sent.
    pub async fn edit_user_group(
        &self,
        group_id: i64,
        name: Option<&str>,
        user_ids: Option<&[i64]>,
        description: Option<&str>,
    ) -> ApiResult<UserGroup> {
        let needs_original = name.is_none() || user_ids.is_none() || description.is_none();
        let original = if needs_original {
            Some(self.get_user_group_by_id(group_id).await?)
        } else {
            None
        };

        let name = match name {
            Some(value) => value.to_string(),
            None => original
                .as_ref()
                .and_then(|g| g.name.clone())
                .unwrap_or_default(),
        };
        let user_ids = match user_ids {
            Some(ids) => ids.to_vec(),
            None => original.as_ref().map(|g| g.member_ids()).unwrap_or_default(),
        };
        let description = match description {
            Some(value) => value.to_string(),
            None => original
                .as_ref()
                .and_then(|g| g.description.clone())
                .unwrap_or_default(),
        };

        let request = Request::put(format!("/user-groups/{group_id}")).body(json!({
            "name": name,
            "userIds": user_ids,
            "description": description,
        }));
        self.fetch_one(request).await
    }

    /// Adds users to an existing group, keeping its current members.
    ///
    /// The endpoint takes a bare JSON array of user IDs as its body.
    pub async fn add_users_to_group(
        &self,
        group_id: i64,
        user_ids: &[i64],
    ) -> ApiResult<UserGroup> {
        let request = Request::post(format!("/user-groups/{group_id}/members"))
            .body(json!(user_ids));
        self.fetch_one(request).await
    }

    /// Removes a single user from a group.
    pub async fn delete_user_from_group(&self, group_id: i64, user_id: i64) -> ApiResult<()> {
        self.execute(Request::delete(format!(
            "/user-groups/{group_id}/members/{user_id}"
        )))
        .await
    }

    /// Deletes a user group.
    pub async fn delete_user_group(&self, group_id: i64) -> ApiResult<()> {
        self.execute(Request::delete(format!("/user-groups/{group_id}")))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_ids() {
        let json = r#"{
            "id": 9,
            "name": "SMEs",
            "users": [{"id": 1}, {"id": 4}, {"id": 7}]
        }"#;
        let group: UserGroup = serde_json::from_str(json).unwrap();
        assert_eq!(group.member_ids(), vec![1, 4, 7]);
    }

    #[test]
    fn test_sort_params() {
        assert_eq!(UserGroupSort::Name.as_param(), "name");
        assert_eq!(UserGroupSort::Size.as_param(), "size");
    }
}
