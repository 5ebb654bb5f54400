//
//  stack-teams-api
//  api/collections.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/10.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Collection API types and methods.
//!
//! Collections bundle questions and articles into curated sets with
//! their own editor lists. The listing endpoint can filter by ownership
//! (`all`, `owned`, `editable`) and by creation date range.
//!
//! # Notes
//!
//! - Editing a collection is read-modify-write: the PUT endpoint replaces
//!   every field including the owner, so omitted fields are backfilled
//!   from the collection's current state first

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::api::client::Request;
use crate::api::common::{ApiError, ApiResult, SortOrder, DEFAULT_PAGE_SIZE};
use crate::api::user_groups::UserGroupSummary;
use crate::api::users::UserSummary;
use crate::StackClient;

/// A content item (question or article) inside a collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionContent {
    /// Unique identifier of the content item.
    pub id: i64,

    /// Kind of the content item (`question` or `article`).
    #[serde(default, rename = "type")]
    pub content_type: Option<String>,

    /// Title of the content item.
    #[serde(default)]
    pub title: Option<String>,

    /// Fields returned by the API but not explicitly modeled.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A full collection record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    /// Unique identifier of the collection.
    pub id: i64,

    /// Title of the collection.
    #[serde(default)]
    pub title: Option<String>,

    /// Free-text description of the collection.
    #[serde(default)]
    pub description: Option<String>,

    /// Owner of the collection.
    #[serde(default)]
    pub owner: Option<UserSummary>,

    /// ISO 8601 creation timestamp.
    #[serde(default)]
    pub creation_date: Option<String>,

    /// Users allowed to edit the collection.
    #[serde(default)]
    pub editor_users: Vec<UserSummary>,

    /// User groups allowed to edit the collection.
    #[serde(default)]
    pub editor_user_groups: Vec<UserGroupSummary>,

    /// The questions and articles in the collection.
    #[serde(default)]
    pub content: Vec<CollectionContent>,

    /// Fields returned by the API but not explicitly modeled.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Collection {
    /// Returns the IDs of the content items in the collection.
    pub fn content_ids(&self) -> Vec<i64> {
        self.content.iter().map(|c| c.id).collect()
    }

    /// Returns the user IDs of the individual editors.
    pub fn editor_user_ids(&self) -> Vec<i64> {
        self.editor_users.iter().map(|u| u.id).collect()
    }

    /// Returns the IDs of the editor user groups.
    pub fn editor_group_ids(&self) -> Vec<i64> {
        self.editor_user_groups.iter().map(|g| g.id).collect()
    }
}

/// Ownership filter for collection listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionPermissions {
    /// All collections visible to the caller (the server default).
    All,
    /// Only collections the caller owns.
    Owned,
    /// Only collections the caller may edit.
    Editable,
}

impl CollectionPermissions {
    /// Returns the query-string value for this filter.
    pub fn as_param(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Owned => "owned",
            Self::Editable => "editable",
        }
    }
}

/// Sort field for collection listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionSort {
    /// Sort by creation date (the server default).
    Creation,
    /// Sort by last edit.
    LastEdit,
}

impl CollectionSort {
    /// Returns the query-string value for this sort field.
    pub fn as_param(&self) -> &'static str {
        match self {
            Self::Creation => "creation",
            Self::LastEdit => "lastEdit",
        }
    }
}

/// Filters for [`StackClient::get_collections`].
#[derive(Debug, Clone, Default)]
pub struct CollectionQuery {
    /// First page to fetch. Defaults to 1.
    pub page: Option<u32>,
    /// Items per page. The API accepts 15, 30, 50, or 100; defaults to 100.
    pub page_size: Option<u32>,
    /// Sort field. Defaults to creation date.
    pub sort: Option<CollectionSort>,
    /// Sort order. Defaults to ascending.
    pub order: Option<SortOrder>,
    /// Only return collections whose title contains this string.
    pub partial_title: Option<String>,
    /// Only return collections authored by these user IDs.
    pub author_ids: Option<Vec<i64>>,
    /// Ownership filter. Defaults to all.
    pub permissions: Option<CollectionPermissions>,
    /// Only return collections created at or after this ISO 8601 date.
    pub from: Option<String>,
    /// Only return collections created at or before this ISO 8601 date.
    pub to: Option<String>,
    /// Fetch a single page instead of paging through all results.
    pub one_page_limit: bool,
}

/// Payload for creating a collection.
#[derive(Debug, Clone, Default)]
pub struct NewCollection {
    /// Title of the collection.
    pub title: String,
    /// Free-text description.
    pub description: String,
    /// Initial content item IDs (questions and articles).
    pub content_ids: Vec<i64>,
    /// Users allowed to edit the collection.
    pub editor_user_ids: Vec<i64>,
    /// User groups allowed to edit the collection.
    pub editor_user_group_ids: Vec<i64>,
}

/// Fields to change in [`StackClient::edit_collection`].
///
/// Every `None` field keeps the collection's current value.
#[derive(Debug, Clone, Default)]
pub struct CollectionEdit {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New owner. The PUT endpoint requires an owner, so leaving this
    /// `None` re-sends the current owner.
    pub owner_id: Option<i64>,
    /// New content item list, replacing the current one.
    pub content_ids: Option<Vec<i64>>,
    /// New individual editor list, replacing the current one.
    pub editor_user_ids: Option<Vec<i64>>,
    /// New editor group list, replacing the current one.
    pub editor_user_group_ids: Option<Vec<i64>>,
}

impl CollectionEdit {
    fn is_partial(&self) -> bool {
        self.title.is_none()
            || self.description.is_none()
            || self.owner_id.is_none()
            || self.content_ids.is_none()
            || self.editor_user_ids.is_none()
            || self.editor_user_group_ids.is_none()
    }
}

impl StackClient {
    /// Retrieves collections, paging through all results.
    pub async fn get_collections(&self, query: &CollectionQuery) -> ApiResult<Vec<Collection>> {
        let mut request = Request::get("/collections")
            .query("sort", query.sort.unwrap_or(CollectionSort::Creation).as_param())
            .query("order", query.order.unwrap_or(SortOrder::Asc).as_param())
            .query(
                "permissions",
                query
                    .permissions
                    .unwrap_or(CollectionPermissions::All)
                    .as_param(),
            )
            .query_opt("partialTitle", query.partial_title.as_ref())
            .query_opt("from", query.from.as_ref())
            .query_opt("to", query.to.as_ref());
        if let Some(author_ids) = &query.author_ids {
            request = request.query_each("authorIds", author_ids);
        }
        self.fetch_all(
            request,
            query.page.unwrap_or(1),
            query.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            query.one_page_limit,
        )
        .await
    }

    /// Retrieves a collection by its ID.
    pub async fn get_collection_by_id(&self, collection_id: i64) -> ApiResult<Collection> {
        self.fetch_one(Request::get(format!("/collections/{collection_id}")))
            .await
    }

    /// Creates a new collection.
    pub async fn add_collection(&self, collection: &NewCollection) -> ApiResult<Collection> {
        let request = Request::post("/collections").body(json!({
            "title": collection.title,
            "description": collection.description,
            "contentIds": collection.content_ids,
            "editorUserIds": collection.editor_user_ids,
            "editorUserGroupIds": collection.editor_user_group_ids,
        }));
        self.fetch_one(request).await
    }

    /// Edits a collection.
    ///
    /// The PUT endpoint replaces every field including the owner, so any
    /// field of `edit` left as `None` is backfilled from the collection's
    /// current state before the update is sent.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] when no owner was given and the
    /// collection's current record carries none either.
    pub async fn edit_collection(
        &self,
        collection_id: i64,
        edit: &CollectionEdit,
    ) -> ApiResult<Collection> {
        let original = if edit.is_partial() {
            Some(self.get_collection_by_id(collection_id).await?)
        } else {
            None
        };

        let title = match &edit.title {
            Some(value) => value.clone(),
            None => original
                .as_ref()
                .and_then(|c| c.title.clone())
                .unwrap_or_default(),
        };
        let description = match &edit.description {
            Some(value) => value.clone(),
            None => original
                .as_ref()
                .and_then(|c| c.description.clone())
                .unwrap_or_default(),
        };
        let owner_id = match edit.owner_id {
            Some(id) => id,
            None => original
                .as_ref()
                .and_then(|c| c.owner.as_ref())
                .map(|owner| owner.id)
                .ok_or_else(|| {
                    ApiError::Decode(format!(
                        "collection {collection_id} has no owner to carry over"
                    ))
                })?,
        };
        let content_ids = match &edit.content_ids {
            Some(ids) => ids.clone(),
            None => original.as_ref().map(|c| c.content_ids()).unwrap_or_default(),
        };
        let editor_user_ids = match &edit.editor_user_ids {
            Some(ids) => ids.clone(),
            None => original
                .as_ref()
                .map(|c| c.editor_user_ids())
                .unwrap_or_default(),
        };
        let editor_user_group_ids = match &edit.editor_user_group_ids {
            Some(ids) => ids.clone(),
            None => original
                .as_ref()
                .map(|c| c.editor_group_ids())
                .unwrap_or_default(),
        };

        let request = Request::put(format!("/collections/{collection_id}")).body(json!({
            "ownerId": owner_id,
            "title": title,
            "description": description,
            "contentIds": content_ids,
            "editorUserIds": editor_user_ids,
            "editorUserGroupIds": editor_user_group_ids,
        }));
        self.fetch_one(request).await
    }

    /// Deletes a collection.
    pub async fn delete_collection(&self, collection_id: i64) -> ApiResult<()> {
        self.execute(Request::delete(format!("/collections/{collection_id}")))
            .await
    }
}
