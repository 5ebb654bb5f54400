//
//  stack-teams-api
//  api/search.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/10.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Search API types and methods.
//!
//! Full-text search across questions, answers, and articles. Unlike the
//! listing endpoints, search defaults to fetching a single page: a broad
//! query can match most of the instance, and relevance-ordered results
//! degrade quickly past the first page anyway. Set
//! [`SearchQuery::one_page_limit`] to `false` to page through everything.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::api::client::Request;
use crate::api::common::{ApiResult, SortOrder, DEFAULT_PAGE_SIZE};
use crate::api::tags::TagSummary;
use crate::api::users::UserSummary;
use crate::StackClient;

/// A single search hit.
///
/// Hits are heterogeneous: a question, an answer, or an article. The
/// `result_type` field says which, and only the matching ID field is
/// populated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// Kind of the hit (`question`, `answer`, or `article`).
    #[serde(default, rename = "type")]
    pub result_type: Option<String>,

    /// Identifier of the matched question, when the hit is a question
    /// or an answer.
    #[serde(default)]
    pub question_id: Option<i64>,

    /// Identifier of the matched article, when the hit is an article.
    #[serde(default)]
    pub article_id: Option<i64>,

    /// Title of the matched post.
    #[serde(default)]
    pub title: Option<String>,

    /// Snippet of the matched content.
    #[serde(default)]
    pub excerpt: Option<String>,

    /// Score of the matched post.
    #[serde(default)]
    pub score: i64,

    /// Tags of the matched post.
    #[serde(default)]
    pub tags: Vec<TagSummary>,

    /// Author of the matched post.
    #[serde(default)]
    pub owner: Option<UserSummary>,

    /// ISO 8601 creation timestamp of the matched post.
    #[serde(default)]
    pub creation_date: Option<String>,

    /// URL of the matched post.
    #[serde(default)]
    pub web_url: Option<String>,

    /// Fields returned by the API but not explicitly modeled.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Sort field for search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchSort {
    /// Sort by relevance to the query (the server default).
    Relevance,
    /// Sort by creation date, newest first.
    Newest,
    /// Sort by recent activity.
    Active,
    /// Sort by score.
    Score,
}

impl SearchSort {
    /// Returns the query-string value for this sort field.
    pub fn as_param(&self) -> &'static str {
        match self {
            Self::Relevance => "relevance",
            Self::Newest => "newest",
            Self::Active => "active",
            Self::Score => "score",
        }
    }
}

/// Parameters for [`StackClient::get_search_results`].
///
/// # Example
///
/// ```rust
/// use stack_teams_api::api::search::SearchQuery;
///
/// // Single page of relevance-ordered hits.
/// let query = SearchQuery::new("deployment checklist");
/// assert!(query.one_page_limit);
///
/// // Page through every match instead.
/// let query = SearchQuery {
///     one_page_limit: false,
///     ..SearchQuery::new("deployment checklist")
/// };
/// ```
#[derive(Debug, Clone)]
pub struct SearchQuery {
    /// The free-text query string.
    pub query: String,
    /// First page to fetch. Defaults to 1.
    pub page: Option<u32>,
    /// Items per page. The API accepts 15, 30, 50, or 100; defaults to 100.
    pub page_size: Option<u32>,
    /// Sort field. Defaults to relevance.
    pub sort: Option<SearchSort>,
    /// Sort order. Defaults to descending.
    pub order: Option<SortOrder>,
    /// Fetch a single page. Defaults to `true` for search.
    pub one_page_limit: bool,
}

impl SearchQuery {
    /// Creates a single-page search for the given query string.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            page: None,
            page_size: None,
            sort: None,
            order: None,
            one_page_limit: true,
        }
    }
}

impl StackClient {
    /// Runs a full-text search across questions, answers, and articles.
    pub async fn get_search_results(&self, query: &SearchQuery) -> ApiResult<Vec<SearchResult>> {
        let request = Request::get("/search")
            .query("query", &query.query)
            .query("sort", query.sort.unwrap_or(SearchSort::Relevance).as_param())
            .query("order", query.order.unwrap_or(SortOrder::Desc).as_param());
        self.fetch_all(
            request,
            query.page.unwrap_or(1),
            query.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            query.one_page_limit,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_defaults_to_one_page() {
        let query = SearchQuery::new("kubernetes");
        assert_eq!(query.query, "kubernetes");
        assert!(query.one_page_limit);
    }

    #[test]
    fn test_parse_heterogeneous_hit() {
        let json = r#"{
            "type": "article",
            "articleId": 44,
            "title": "Release process",
            "excerpt": "Our release process is...",
            "tags": [{"id": 2, "name": "process"}]
        }"#;
        let hit: SearchResult = serde_json::from_str(json).unwrap();
        assert_eq!(hit.result_type.as_deref(), Some("article"));
        assert_eq!(hit.article_id, Some(44));
        assert_eq!(hit.question_id, None);
    }

    #[test]
    fn test_sort_params() {
        assert_eq!(SearchSort::Relevance.as_param(), "relevance");
        assert_eq!(SearchSort::Newest.as_param(), "newest");
    }
}
