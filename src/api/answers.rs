//
//  stack-teams-api
//  api/answers.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/10.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Answer API types and methods.
//!
//! Answers always live under a question, so every endpoint here is keyed
//! by both a question ID and (where applicable) an answer ID. The
//! composite [`StackClient::get_all_answers`] flattens answers across all
//! questions and stamps each one with the tags of its parent question.
//!
//! # Notes
//!
//! - The answer comments endpoint returns a bare array, like question
//!   comments
//! - `question_tags` and `comments` are never sent by the server; they
//!   are filled in locally by the composite methods

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::api::client::Request;
use crate::api::common::{ApiResult, SortOrder, DEFAULT_PAGE_SIZE};
use crate::api::questions::Comment;
use crate::api::tags::TagSummary;
use crate::api::users::UserSummary;
use crate::StackClient;

/// A full answer record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    /// Unique identifier of the answer.
    pub id: i64,

    /// Rendered body of the answer.
    #[serde(default)]
    pub body: Option<String>,

    /// Score of the answer.
    #[serde(default)]
    pub score: i64,

    /// Whether the answer is accepted on its question.
    #[serde(default)]
    pub is_accepted: bool,

    /// Number of comments on the answer.
    #[serde(default)]
    pub comment_count: i64,

    /// Author of the answer.
    #[serde(default)]
    pub owner: Option<UserSummary>,

    /// ISO 8601 creation timestamp.
    #[serde(default)]
    pub creation_date: Option<String>,

    /// URL of the answer on its question page.
    #[serde(default)]
    pub web_url: Option<String>,

    /// Tags of the parent question, populated only by
    /// [`StackClient::get_all_answers`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_tags: Option<Vec<TagSummary>>,

    /// Comments, populated only by
    /// [`StackClient::get_all_questions_answers_and_comments`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<Vec<Comment>>,

    /// Fields returned by the API but not explicitly modeled.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Sort field for answer listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerSort {
    /// Sort by creation date (the server default).
    Creation,
    /// Sort by score.
    Score,
}

impl AnswerSort {
    /// Returns the query-string value for this sort field.
    pub fn as_param(&self) -> &'static str {
        match self {
            Self::Creation => "creation",
            Self::Score => "score",
        }
    }
}

/// Filters for [`StackClient::get_answers`].
#[derive(Debug, Clone, Default)]
pub struct AnswerQuery {
    /// First page to fetch. Defaults to 1.
    pub page: Option<u32>,
    /// Items per page. The API accepts 15, 30, 50, or 100; defaults to 100.
    pub page_size: Option<u32>,
    /// Sort field. Defaults to creation date.
    pub sort: Option<AnswerSort>,
    /// Sort order. Defaults to ascending.
    pub order: Option<SortOrder>,
    /// Fetch a single page instead of paging through all results.
    pub one_page_limit: bool,
}

impl StackClient {
    /// Retrieves the answers on a question, paging through all results.
    pub async fn get_answers(
        &self,
        question_id: i64,
        query: &AnswerQuery,
    ) -> ApiResult<Vec<Answer>> {
        let request = Request::get(format!("/questions/{question_id}/answers"))
            .query("sort", query.sort.unwrap_or(AnswerSort::Creation).as_param())
            .query("order", query.order.unwrap_or(SortOrder::Asc).as_param());
        self.fetch_all(
            request,
            query.page.unwrap_or(1),
            query.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            query.one_page_limit,
        )
        .await
    }

    /// Retrieves a single answer.
    pub async fn get_answer_by_id(&self, question_id: i64, answer_id: i64) -> ApiResult<Answer> {
        self.fetch_one(Request::get(format!(
            "/questions/{question_id}/answers/{answer_id}"
        )))
        .await
    }

    /// Posts an answer on a question.
    ///
    /// # Parameters
    ///
    /// * `question_id` - The question being answered
    /// * `body` - Body of the answer, in Markdown
    pub async fn add_answer(&self, question_id: i64, body: &str) -> ApiResult<Answer> {
        let request = Request::post(format!("/questions/{question_id}/answers"))
            .body(json!({ "body": body }));
        self.fetch_one(request).await
    }

    /// Retrieves the comments on an answer.
    ///
    /// The comments endpoint returns a bare array rather than a page
    /// envelope.
    pub async fn get_answer_comments(
        &self,
        question_id: i64,
        answer_id: i64,
    ) -> ApiResult<Vec<Comment>> {
        self.fetch_one(Request::get(format!(
            "/questions/{question_id}/answers/{answer_id}/comments"
        )))
        .await
    }

    /// Retrieves every answer on the instance, flattened across
    /// questions.
    ///
    /// Each answer is stamped with the tags of its parent question in
    /// `question_tags`, which is how answer activity gets attributed to
    /// tags in reporting.
    pub async fn get_all_answers(&self) -> ApiResult<Vec<Answer>> {
        let questions = self.get_all_questions_and_answers().await?;
        let mut answers = Vec::new();
        for question in questions {
            let tags = question.tags;
            for mut answer in question.answers.unwrap_or_default() {
                answer.question_tags = Some(tags.clone());
                answers.push(answer);
            }
        }
        Ok(answers)
    }

    /// Deletes an answer.
    pub async fn delete_answer(&self, question_id: i64, answer_id: i64) -> ApiResult<()> {
        self.execute(Request::delete(format!(
            "/questions/{question_id}/answers/{answer_id}"
        )))
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_answer() {
        let json = r#"{
            "id": 55,
            "body": "<p>Use serde_json.</p>",
            "score": 3,
            "isAccepted": true,
            "commentCount": 1,
            "creationDate": "2024-03-02T08:00:00.000Z"
        }"#;
        let answer: Answer = serde_json::from_str(json).unwrap();
        assert!(answer.is_accepted);
        assert_eq!(answer.comment_count, 1);
        assert!(answer.question_tags.is_none());
    }

    #[test]
    fn test_serialized_answer_omits_unset_local_fields() {
        let answer: Answer = serde_json::from_str(r#"{"id": 2}"#).unwrap();
        let rendered = serde_json::to_string(&answer).unwrap();
        assert!(!rendered.contains("questionTags"));
        assert!(!rendered.contains("\"comments\""));
    }

    #[test]
    fn test_sort_params() {
        assert_eq!(AnswerSort::Creation.as_param(), "creation");
        assert_eq!(AnswerSort::Score.as_param(), "score");
    }
}
