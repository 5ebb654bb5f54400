//
//  stack-teams-api
//  api/articles.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/10.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Article API types and methods.
//!
//! Articles are long-form content (knowledge articles, announcements,
//! policies, how-to guides) with an editing-permission model on top:
//! each article is editable by its owner only, by specific users and
//! groups, or by everyone.
//!
//! # Notes
//!
//! - Editing an article is read-modify-write: the PUT endpoint replaces
//!   every field including permissions, so omitted fields are backfilled
//!   from the article's current state first

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::api::client::Request;
use crate::api::common::{ApiResult, SortOrder, DEFAULT_PAGE_SIZE};
use crate::api::tags::TagSummary;
use crate::api::user_groups::UserGroupSummary;
use crate::api::users::UserSummary;
use crate::StackClient;

/// The type of an article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ArticleType {
    /// A knowledge-base article.
    KnowledgeArticle,
    /// An announcement.
    Announcement,
    /// A policy document.
    Policy,
    /// A step-by-step guide.
    HowToGuide,
}

/// Who may edit an article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EditableBy {
    /// Only the article owner may edit.
    OwnerOnly,
    /// Only the listed users and user groups may edit.
    SpecificEditors,
    /// Any user may edit.
    Everyone,
}

/// The editing permissions attached to an article.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticlePermissions {
    /// Who may edit the article.
    #[serde(default)]
    pub editable_by: Option<EditableBy>,

    /// Users allowed to edit, when `editable_by` is `SpecificEditors`.
    #[serde(default)]
    pub editor_users: Vec<UserSummary>,

    /// User groups allowed to edit, when `editable_by` is
    /// `SpecificEditors`.
    #[serde(default)]
    pub editor_user_groups: Vec<UserGroupSummary>,
}

impl ArticlePermissions {
    /// Returns the user IDs of the individual editors.
    pub fn editor_user_ids(&self) -> Vec<i64> {
        self.editor_users.iter().map(|u| u.id).collect()
    }

    /// Returns the IDs of the editor user groups.
    pub fn editor_group_ids(&self) -> Vec<i64> {
        self.editor_user_groups.iter().map(|g| g.id).collect()
    }
}

/// A full article record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Unique identifier of the article.
    pub id: i64,

    /// Title of the article.
    #[serde(default)]
    pub title: Option<String>,

    /// Rendered body of the article.
    #[serde(default)]
    pub body: Option<String>,

    /// The type of the article.
    #[serde(default, rename = "type")]
    pub article_type: Option<ArticleType>,

    /// Tags applied to the article.
    #[serde(default)]
    pub tags: Vec<TagSummary>,

    /// Author of the article.
    #[serde(default)]
    pub owner: Option<UserSummary>,

    /// ISO 8601 creation timestamp.
    #[serde(default)]
    pub creation_date: Option<String>,

    /// ISO 8601 timestamp of the last activity on the article.
    #[serde(default)]
    pub last_activity_date: Option<String>,

    /// Score of the article.
    #[serde(default)]
    pub score: i64,

    /// Number of times the article has been viewed.
    #[serde(default)]
    pub view_count: i64,

    /// Editing permissions of the article.
    #[serde(default)]
    pub permissions: Option<ArticlePermissions>,

    /// URL of the article page.
    #[serde(default)]
    pub web_url: Option<String>,

    /// Fields returned by the API but not explicitly modeled.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Article {
    /// Returns the tag names applied to the article.
    pub fn tag_names(&self) -> Vec<String> {
        self.tags
            .iter()
            .filter_map(|tag| tag.name.clone())
            .collect()
    }
}

/// Payload for creating an article.
#[derive(Debug, Clone)]
pub struct NewArticle {
    /// Title of the article.
    pub title: String,
    /// Body of the article, in Markdown.
    pub body: String,
    /// The type of the article.
    pub article_type: ArticleType,
    /// Tag names to apply; tags that do not exist yet are created.
    pub tags: Vec<String>,
    /// Who may edit the article. Defaults to owner-only.
    pub editable_by: Option<EditableBy>,
    /// Users allowed to edit, for `SpecificEditors`.
    pub editor_user_ids: Vec<i64>,
    /// User groups allowed to edit, for `SpecificEditors`.
    pub editor_user_group_ids: Vec<i64>,
}

/// Fields to change in [`StackClient::edit_article`].
///
/// Every `None` field keeps the article's current value.
#[derive(Debug, Clone, Default)]
pub struct ArticleEdit {
    /// New title.
    pub title: Option<String>,
    /// New body, in Markdown.
    pub body: Option<String>,
    /// New article type.
    pub article_type: Option<ArticleType>,
    /// New tag names, replacing the current tags.
    pub tags: Option<Vec<String>>,
    /// New editing permission level.
    pub editable_by: Option<EditableBy>,
    /// New individual editor list, replacing the current one.
    pub editor_user_ids: Option<Vec<i64>>,
    /// New editor group list, replacing the current one.
    pub editor_user_group_ids: Option<Vec<i64>>,
}

impl ArticleEdit {
    fn is_partial(&self) -> bool {
        self.title.is_none()
            || self.body.is_none()
            || self.article_type.is_none()
            || self.tags.is_none()
            || self.editable_by.is_none()
            || self.editor_user_ids.is_none()
            || self.editor_user_group_ids.is_none()
    }
}

/// Sort field for article listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArticleSort {
    /// Sort by creation date (the server default).
    Creation,
    /// Sort by last activity.
    Activity,
    /// Sort by score.
    Score,
}

impl ArticleSort {
    /// Returns the query-string value for this sort field.
    pub fn as_param(&self) -> &'static str {
        match self {
            Self::Creation => "creation",
            Self::Activity => "activity",
            Self::Score => "score",
        }
    }
}

/// Filters for [`StackClient::get_articles`].
#[derive(Debug, Clone, Default)]
pub struct ArticleQuery {
    /// First page to fetch. Defaults to 1.
    pub page: Option<u32>,
    /// Items per page. The API accepts 15, 30, 50, or 100; defaults to 100.
    pub page_size: Option<u32>,
    /// Sort field. Defaults to creation date.
    pub sort: Option<ArticleSort>,
    /// Sort order. Defaults to ascending.
    pub order: Option<SortOrder>,
    /// Only return articles carrying one of these tag IDs.
    pub tag_ids: Option<Vec<i64>>,
    /// Only return articles authored by this user ID.
    pub author_id: Option<i64>,
    /// Only return articles created at or after this ISO 8601 date.
    pub from: Option<String>,
    /// Only return articles created at or before this ISO 8601 date.
    pub to: Option<String>,
    /// Fetch a single page instead of paging through all results.
    pub one_page_limit: bool,
}

fn permissions_payload(
    editable_by: EditableBy,
    editor_user_ids: &[i64],
    editor_user_group_ids: &[i64],
) -> Value {
    json!({
        "editableBy": editable_by,
        "editorUserIds": editor_user_ids,
        "editorUserGroupIds": editor_user_group_ids,
    })
}

impl StackClient {
    /// Retrieves articles, paging through all results.
    pub async fn get_articles(&self, query: &ArticleQuery) -> ApiResult<Vec<Article>> {
        let mut request = Request::get("/articles")
            .query("sort", query.sort.unwrap_or(ArticleSort::Creation).as_param())
            .query("order", query.order.unwrap_or(SortOrder::Asc).as_param())
            .query_opt("authorId", query.author_id)
            .query_opt("from", query.from.as_ref())
            .query_opt("to", query.to.as_ref());
        if let Some(tag_ids) = &query.tag_ids {
            request = request.query_each("tagId", tag_ids);
        }
        self.fetch_all(
            request,
            query.page.unwrap_or(1),
            query.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            query.one_page_limit,
        )
        .await
    }

    /// Retrieves an article by its ID.
    pub async fn get_article_by_id(&self, article_id: i64) -> ApiResult<Article> {
        self.fetch_one(Request::get(format!("/articles/{article_id}")))
            .await
    }

    /// Creates a new article.
    pub async fn add_article(&self, article: &NewArticle) -> ApiResult<Article> {
        let request = Request::post("/articles").body(json!({
            "title": article.title,
            "body": article.body,
            "type": article.article_type,
            "tags": article.tags,
            "permissions": permissions_payload(
                article.editable_by.unwrap_or(EditableBy::OwnerOnly),
                &article.editor_user_ids,
                &article.editor_user_group_ids,
            ),
        }));
        self.fetch_one(request).await
    }

    /// Edits an article.
    ///
    /// The PUT endpoint replaces every field including permissions, so
    /// any field of `edit` left as `None` is backfilled from the
    /// article's current state before the update is sent.
    pub async fn edit_article(&self, article_id: i64, edit: &ArticleEdit) -> ApiResult<Article> {
        let original = if edit.is_partial() {
            Some(self.get_article_by_id(article_id).await?)
        } else {
            None
        };
        let current_permissions = original
            .as_ref()
            .and_then(|a| a.permissions.clone())
            .unwrap_or_default();

        let title = match &edit.title {
            Some(value) => value.clone(),
            None => original
                .as_ref()
                .and_then(|a| a.title.clone())
                .unwrap_or_default(),
        };
        let body = match &edit.body {
            Some(value) => value.clone(),
            None => original
                .as_ref()
                .and_then(|a| a.body.clone())
                .unwrap_or_default(),
        };
        let article_type = edit
            .article_type
            .or_else(|| original.as_ref().and_then(|a| a.article_type))
            .unwrap_or(ArticleType::KnowledgeArticle);
        let tags = match &edit.tags {
            Some(names) => names.clone(),
            None => original.as_ref().map(|a| a.tag_names()).unwrap_or_default(),
        };
        let editable_by = edit
            .editable_by
            .or(current_permissions.editable_by)
            .unwrap_or(EditableBy::OwnerOnly);
        let editor_user_ids = match &edit.editor_user_ids {
            Some(ids) => ids.clone(),
            None => current_permissions.editor_user_ids(),
        };
        let editor_user_group_ids = match &edit.editor_user_group_ids {
            Some(ids) => ids.clone(),
            None => current_permissions.editor_group_ids(),
        };

        let request = Request::put(format!("/articles/{article_id}")).body(json!({
            "title": title,
            "body": body,
            "type": article_type,
            "tags": tags,
            "permissions": permissions_payload(
                editable_by,
                &editor_user_ids,
                &editor_user_group_ids,
            ),
        }));
        self.fetch_one(request).await
    }

    /// Deletes an article.
    pub async fn delete_article(&self, article_id: i64) -> ApiResult<()> {
        self.execute(Request::delete(format!("/articles/{article_id}")))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_type_wire_values() {
        assert_eq!(
            serde_json::to_string(&ArticleType::KnowledgeArticle).unwrap(),
            "\"knowledgeArticle\""
        );
        assert_eq!(
            serde_json::to_string(&ArticleType::HowToGuide).unwrap(),
            "\"howToGuide\""
        );
        assert_eq!(
            serde_json::to_string(&EditableBy::OwnerOnly).unwrap(),
            "\"ownerOnly\""
        );
    }

    #[test]
    fn test_parse_article_with_permissions() {
        let json = r#"{
            "id": 30,
            "title": "Deployment policy",
            "type": "policy",
            "permissions": {
                "editableBy": "specificEditors",
                "editorUsers": [{"id": 4}],
                "editorUserGroups": [{"id": 9}]
            }
        }"#;
        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.article_type, Some(ArticleType::Policy));
        let permissions = article.permissions.unwrap();
        assert_eq!(permissions.editable_by, Some(EditableBy::SpecificEditors));
        assert_eq!(permissions.editor_user_ids(), vec![4]);
        assert_eq!(permissions.editor_group_ids(), vec![9]);
    }

    #[test]
    fn test_edit_partial_detection() {
        let edit = ArticleEdit {
            title: Some("New title".to_string()),
            ..Default::default()
        };
        assert!(edit.is_partial());
    }
}
