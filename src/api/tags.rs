//
//  stack-teams-api
//  api/tags.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/10.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Tag API types and methods.
//!
//! Tags classify questions and articles, and each tag can carry subject
//! matter experts (SMEs): individual users and whole user groups whose
//! answers the instance highlights. This module covers tag listings, the
//! SME read/replace/append/remove endpoints, and a composite that stitches
//! SMEs onto every tag in one call.
//!
//! # Notes
//!
//! - `edit_tag_smes` replaces the entire SME configuration of a tag;
//!   `add_sme_users`/`add_sme_groups` append to it
//! - The API has no tag-by-name endpoint; [`StackClient::get_tag_by_name`]
//!   filters a listing locally and reports a miss as [`ApiError::NotFound`]

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::debug;

use crate::api::client::Request;
use crate::api::common::{ApiError, ApiResult, SortOrder, DEFAULT_PAGE_SIZE};
use crate::api::user_groups::UserGroupSummary;
use crate::api::users::UserSummary;
use crate::StackClient;

/// A lightweight tag reference embedded in questions and articles.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagSummary {
    /// Unique identifier of the tag.
    pub id: i64,

    /// Name of the tag.
    #[serde(default)]
    pub name: Option<String>,

    /// Fields returned by the API but not explicitly modeled.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A full tag record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    /// Unique identifier of the tag.
    pub id: i64,

    /// Name of the tag.
    #[serde(default)]
    pub name: Option<String>,

    /// Free-text description of the tag.
    #[serde(default)]
    pub description: Option<String>,

    /// Number of posts carrying the tag.
    #[serde(default)]
    pub post_count: i64,

    /// Number of subject matter experts assigned to the tag.
    #[serde(default)]
    pub subject_matter_expert_count: Option<i64>,

    /// Number of users watching the tag.
    #[serde(default)]
    pub watcher_count: Option<i64>,

    /// Whether synonyms exist for the tag.
    #[serde(default)]
    pub has_synonyms: bool,

    /// ISO 8601 creation timestamp of the tag.
    #[serde(default)]
    pub creation_date: Option<String>,

    /// URL of the tag page.
    #[serde(default)]
    pub web_url: Option<String>,

    /// Subject matter experts, populated only by
    /// [`StackClient::get_all_tags_and_smes`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smes: Option<TagSmes>,

    /// Fields returned by the API but not explicitly modeled.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The subject matter experts assigned to a tag.
///
/// SMEs come in two flavors: individually assigned users, and user
/// groups whose whole membership counts as experts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagSmes {
    /// Individually assigned expert users.
    #[serde(default)]
    pub users: Vec<UserSummary>,

    /// User groups assigned as experts.
    #[serde(default)]
    pub user_groups: Vec<UserGroupSummary>,
}

/// Sort field for tag listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagSort {
    /// Sort by tag name.
    Name,
    /// Sort by number of posts carrying the tag.
    PostCount,
    /// Sort by tag creation date (the server default).
    CreationDate,
}

impl TagSort {
    /// Returns the query-string value for this sort field.
    pub fn as_param(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::PostCount => "postCount",
            Self::CreationDate => "creationDate",
        }
    }
}

/// Filters for [`StackClient::get_tags`].
#[derive(Debug, Clone, Default)]
pub struct TagQuery {
    /// First page to fetch. Defaults to 1.
    pub page: Option<u32>,
    /// Items per page. The API accepts 15, 30, 50, or 100; defaults to 100.
    pub page_size: Option<u32>,
    /// Sort field. Defaults to creation date.
    pub sort: Option<TagSort>,
    /// Sort order. Defaults to ascending.
    pub order: Option<SortOrder>,
    /// Only return tags whose name contains this string.
    pub partial_name: Option<String>,
    /// Only return tags that do (or do not) have SMEs assigned.
    pub has_smes: Option<bool>,
    /// Fetch a single page instead of paging through all results.
    pub one_page_limit: bool,
}

impl StackClient {
    /// Retrieves tags, paging through all results.
    pub async fn get_tags(&self, query: &TagQuery) -> ApiResult<Vec<Tag>> {
        let request = Request::get("/tags")
            .query("sort", query.sort.unwrap_or(TagSort::CreationDate).as_param())
            .query("order", query.order.unwrap_or(SortOrder::Asc).as_param())
            .query_opt("partialName", query.partial_name.as_ref())
            .query_opt("hasSmes", query.has_smes);
        self.fetch_all(
            request,
            query.page.unwrap_or(1),
            query.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            query.one_page_limit,
        )
        .await
    }

    /// Retrieves a tag by its ID.
    pub async fn get_tag_by_id(&self, tag_id: i64) -> ApiResult<Tag> {
        self.fetch_one(Request::get(format!("/tags/{tag_id}"))).await
    }

    /// Retrieves a tag by its exact name.
    ///
    /// The API has no tag-by-name endpoint, so this searches a
    /// `partialName` listing and keeps the exact match.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] when no tag with that exact name
    /// exists.
    pub async fn get_tag_by_name(&self, name: &str) -> ApiResult<Tag> {
        let query = TagQuery {
            partial_name: Some(name.to_string()),
            ..Default::default()
        };
        let tags = self.get_tags(&query).await?;
        tags.into_iter()
            .find(|tag| tag.name.as_deref() == Some(name))
            .ok_or_else(|| ApiError::NotFound(format!("no tag named '{name}'")))
    }

    /// Retrieves the subject matter experts assigned to a tag.
    pub async fn get_tag_smes(&self, tag_id: i64) -> ApiResult<TagSmes> {
        self.fetch_one(Request::get(format!(
            "/tags/{tag_id}/subject-matter-experts"
        )))
        .await
    }

    /// Replaces the entire SME configuration of a tag.
    ///
    /// Both lists overwrite what is currently assigned; pass an empty
    /// slice to clear one side.
    ///
    /// # Parameters
    ///
    /// * `tag_id` - The tag to configure
    /// * `user_ids` - Users to assign as individual SMEs
    /// * `group_ids` - User groups to assign as SME groups
    pub async fn edit_tag_smes(
        &self,
        tag_id: i64,
        user_ids: &[i64],
        group_ids: &[i64],
    ) -> ApiResult<TagSmes> {
        let request = Request::put(format!("/tags/{tag_id}/subject-matter-experts")).body(json!({
            "userIds": user_ids,
            "userGroupIds": group_ids,
        }));
        self.fetch_one(request).await
    }

    /// Adds individual SME users to a tag, keeping its current SMEs.
    ///
    /// The endpoint takes a bare JSON array of user IDs as its body.
    pub async fn add_sme_users(&self, tag_id: i64, user_ids: &[i64]) -> ApiResult<TagSmes> {
        let request = Request::post(format!("/tags/{tag_id}/subject-matter-experts/users"))
            .body(json!(user_ids));
        self.fetch_one(request).await
    }

    /// Adds SME user groups to a tag, keeping its current SMEs.
    ///
    /// The endpoint takes a bare JSON array of group IDs as its body.
    pub async fn add_sme_groups(&self, tag_id: i64, group_ids: &[i64]) -> ApiResult<TagSmes> {
        let request = Request::post(format!("/tags/{tag_id}/subject-matter-experts/user-groups"))
            .body(json!(group_ids));
        self.fetch_one(request).await
    }

    /// Removes a single SME user from a tag.
    pub async fn remove_sme_user(&self, tag_id: i64, user_id: i64) -> ApiResult<()> {
        self.execute(Request::delete(format!(
            "/tags/{tag_id}/subject-matter-experts/users/{user_id}"
        )))
        .await
    }

    /// Removes a single SME user group from a tag.
    pub async fn remove_sme_group(&self, tag_id: i64, group_id: i64) -> ApiResult<()> {
        self.execute(Request::delete(format!(
            "/tags/{tag_id}/subject-matter-experts/user-groups/{group_id}"
        )))
        .await
    }

    /// Retrieves every tag with its SMEs attached.
    ///
    /// Fetches all tags, then fetches the SMEs of each tag that reports a
    /// non-zero SME count; tags without SMEs get an empty [`TagSmes`] so
    /// the field is populated on every returned tag. One extra request is
    /// made per tag with SMEs; the first failure aborts the whole
    /// operation.
    pub async fn get_all_tags_and_smes(&self) -> ApiResult<Vec<Tag>> {
        let mut tags = self.get_tags(&TagQuery::default()).await?;
        for tag in &mut tags {
            if tag.subject_matter_expert_count.unwrap_or(0) > 0 {
                debug!(tag_id = tag.id, "fetching SMEs for tag");
                tag.smes = Some(self.get_tag_smes(tag.id).await?);
            } else {
                tag.smes = Some(TagSmes::default());
            }
        }
        Ok(tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tag() {
        let json = r#"{
            "id": 17,
            "name": "rust",
            "postCount": 42,
            "subjectMatterExpertCount": 2,
            "hasSynonyms": false,
            "creationDate": "2024-01-15T09:30:00.000Z"
        }"#;
        let tag: Tag = serde_json::from_str(json).unwrap();
        assert_eq!(tag.name.as_deref(), Some("rust"));
        assert_eq!(tag.subject_matter_expert_count, Some(2));
        assert!(tag.smes.is_none());
    }

    #[test]
    fn test_serialized_tag_omits_unset_smes() {
        let tag: Tag = serde_json::from_str(r#"{"id": 1, "name": "go"}"#).unwrap();
        let rendered = serde_json::to_string(&tag).unwrap();
        assert!(!rendered.contains("smes"));
    }

    #[test]
    fn test_parse_smes() {
        let json = r#"{
            "users": [{"id": 3, "name": "Alice"}],
            "userGroups": [{"id": 8, "name": "Platform"}]
        }"#;
        let smes: TagSmes = serde_json::from_str(json).unwrap();
        assert_eq!(smes.users.len(), 1);
        assert_eq!(smes.user_groups.len(), 1);
    }

    #[test]
    fn test_sort_params() {
        assert_eq!(TagSort::Name.as_param(), "name");
        assert_eq!(TagSort::PostCount.as_param(), "postCount");
        assert_eq!(TagSort::CreationDate.as_param(), "creationDate");
    }
}
