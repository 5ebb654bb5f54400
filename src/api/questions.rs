//
//  stack-teams-api
//  api/questions.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/10.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Question API types and methods.
//!
//! Questions are the primary content type of a Teams instance. This
//! module covers CRUD on questions, question comments, and the composite
//! methods that stitch answers and comments onto every question in one
//! call. [`Comment`] is defined here because questions and answers share
//! the same comment shape.
//!
//! # Example
//!
//! ```rust,no_run
//! use stack_teams_api::{StackClient, api::questions::NewQuestion};
//!
//! # async fn example() -> Result<(), stack_teams_api::ApiError> {
//! let client = StackClient::new("https://teams.example.com", "token")?;
//! let question = client
//!     .add_question(&NewQuestion {
//!         title: "How do I parse JSON in Rust?".to_string(),
//!         body: "I have a string of JSON...".to_string(),
//!         tags: vec!["rust".to_string(), "json".to_string()],
//!     })
//!     .await?;
//! println!("created question {}", question.id);
//! # Ok(())
//! # }
//! ```
//!
//! # Notes
//!
//! - Editing a question is read-modify-write: the PUT endpoint replaces
//!   title, body, and tags, so omitted fields are backfilled first
//! - The composite methods issue one extra request per question (and per
//!   answer) that reports nested content; the first failure aborts

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::debug;

use crate::api::answers::Answer;
use crate::api::client::{AuthScope, Request};
use crate::api::common::{ApiResult, SortOrder, DEFAULT_PAGE_SIZE};
use crate::api::tags::TagSummary;
use crate::api::users::UserSummary;
use crate::StackClient;

/// A comment on a question or an answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Unique identifier of the comment.
    pub id: i64,

    /// Rendered body of the comment.
    #[serde(default)]
    pub body: Option<String>,

    /// ISO 8601 creation timestamp.
    #[serde(default)]
    pub creation_date: Option<String>,

    /// Score of the comment.
    #[serde(default)]
    pub score: i64,

    /// Author of the comment.
    #[serde(default)]
    pub owner: Option<UserSummary>,

    /// Fields returned by the API but not explicitly modeled.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A full question record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Unique identifier of the question.
    pub id: i64,

    /// Title of the question.
    #[serde(default)]
    pub title: Option<String>,

    /// Rendered body of the question.
    #[serde(default)]
    pub body: Option<String>,

    /// Tags applied to the question.
    #[serde(default)]
    pub tags: Vec<TagSummary>,

    /// Author of the question.
    #[serde(default)]
    pub owner: Option<UserSummary>,

    /// ISO 8601 creation timestamp.
    #[serde(default)]
    pub creation_date: Option<String>,

    /// ISO 8601 timestamp of the last activity on the question.
    #[serde(default)]
    pub last_activity_date: Option<String>,

    /// Score of the question.
    #[serde(default)]
    pub score: i64,

    /// Number of times the question has been viewed.
    #[serde(default)]
    pub view_count: i64,

    /// Number of answers on the question.
    #[serde(default)]
    pub answer_count: i64,

    /// Number of comments on the question.
    #[serde(default)]
    pub comment_count: i64,

    /// Whether the question has at least one answer.
    #[serde(default)]
    pub is_answered: bool,

    /// Whether one of the answers is accepted.
    #[serde(default)]
    pub has_accepted_answer: bool,

    /// URL of the question page.
    #[serde(default)]
    pub web_url: Option<String>,

    /// Answers, populated only by the composite methods.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answers: Option<Vec<Answer>>,

    /// Comments, populated only by
    /// [`StackClient::get_all_questions_answers_and_comments`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<Vec<Comment>>,

    /// Fields returned by the API but not explicitly modeled.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Question {
    /// Returns the tag names applied to the question.
    pub fn tag_names(&self) -> Vec<String> {
        self.tags
            .iter()
            .filter_map(|tag| tag.name.clone())
            .collect()
    }
}

/// Payload for creating a question.
#[derive(Debug, Clone, Serialize)]
pub struct NewQuestion {
    /// Title of the question.
    pub title: String,
    /// Body of the question, in Markdown.
    pub body: String,
    /// Tag names to apply; tags that do not exist yet are created.
    pub tags: Vec<String>,
}

/// Sort field for question listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionSort {
    /// Sort by creation date (the server default).
    Creation,
    /// Sort by last activity.
    Activity,
    /// Sort by score.
    Score,
}

impl QuestionSort {
    /// Returns the query-string value for this sort field.
    pub fn as_param(&self) -> &'static str {
        match self {
            Self::Creation => "creation",
            Self::Activity => "activity",
            Self::Score => "score",
        }
    }
}

/// Filters for [`StackClient::get_questions`].
///
/// Filters left as `None` are not sent at all; the server applies its
/// own defaults. List filters are sent as repeated parameters and
/// combined with OR logic.
#[derive(Debug, Clone, Default)]
pub struct QuestionQuery {
    /// First page to fetch. Defaults to 1.
    pub page: Option<u32>,
    /// Items per page. The API accepts 15, 30, 50, or 100; defaults to 100.
    pub page_size: Option<u32>,
    /// Sort field. Defaults to creation date.
    pub sort: Option<QuestionSort>,
    /// Sort order. Defaults to ascending.
    pub order: Option<SortOrder>,
    /// Only return questions that do (or do not) have answers.
    pub is_answered: Option<bool>,
    /// Only return questions with (or without) an accepted answer.
    pub has_accepted_answer: Option<bool>,
    /// Only return these question IDs.
    pub question_ids: Option<Vec<i64>>,
    /// Only return questions carrying one of these tag IDs.
    pub tag_ids: Option<Vec<i64>>,
    /// Only return questions authored by this user ID.
    pub author_id: Option<i64>,
    /// Only return questions created at or after this ISO 8601 date.
    pub from: Option<String>,
    /// Only return questions created at or before this ISO 8601 date.
    pub to: Option<String>,
    /// Fetch a single page instead of paging through all results.
    pub one_page_limit: bool,
}

impl StackClient {
    /// Retrieves questions, paging through all results.
    pub async fn get_questions(&self, query: &QuestionQuery) -> ApiResult<Vec<Question>> {
        let mut request = Request::get("/questions")
            .query("sort", query.sort.unwrap_or(QuestionSort::Creation).as_param())
            .query("order", query.order.unwrap_or(SortOrder::Asc).as_param())
            .query_opt("isAnswered", query.is_answered)
            .query_opt("hasAcceptedAnswer", query.has_accepted_answer)
            .query_opt("authorId", query.author_id)
            .query_opt("from", query.from.as_ref())
            .query_opt("to", query.to.as_ref());
        if let Some(question_ids) = &query.question_ids {
            request = request.query_each("questionId", question_ids);
        }
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

    /// Retrieves a question by its ID.
    pub async fn get_question_by_id(&self, question_id: i64) -> ApiResult<Question> {
        self.fetch_one(Request::get(format!("/questions/{question_id}")))
            .await
    }

    /// Creates a new question.
    pub async fn add_question(&self, question: &NewQuestion) -> ApiResult<Question> {
        self.add_question_with_scope(question, AuthScope::Standard)
            .await
    }

    /// Creates a question under the given authentication scope.
    pub(crate) async fn add_question_with_scope(
        &self,
        question: &NewQuestion,
        scope: AuthScope,
    ) -> ApiResult<Question> {
        let request = Request::post("/questions")
            .body(json!({
                "title": question.title,
                "body": question.body,
                "tags": question.tags,
            }))
            .auth(scope);
        self.fetch_one(request).await
    }

    /// Edits a question.
    ///
    /// The PUT endpoint replaces title, body, and tags together, so any
    /// argument left as `None` is backfilled from the question's current
    /// state before the update is sent.
    pub async fn edit_question(
        &self,
        question_id: i64,
        title: Option<&str>,
        body: Option<&str>,
        tags: Option<&[String]>,
    ) -> ApiResult<Question> {
        let needs_original = title.is_none() || body.is_none() || tags.is_none();
        let original = if needs_original {
            Some(self.get_question_by_id(question_id).await?)
        } else {
            None
        };

        let title = match title {
            Some(value) => value.to_string(),
            None => original
                .as_ref()
                .and_then(|q| q.title.clone())
                .unwrap_or_default(),
        };
        let body = match body {
            Some(value) => value.to_string(),
            None => original
                .as_ref()
                .and_then(|q| q.body.clone())
                .unwrap_or_default(),
        };
        let tags = match tags {
            Some(names) => names.to_vec(),
            None => original.as_ref().map(|q| q.tag_names()).unwrap_or_default(),
        };

        let request = Request::put(format!("/questions/{question_id}")).body(json!({
            "title": title,
            "body": body,
            "tags": tags,
        }));
        self.fetch_one(request).await
    }

    /// Deletes a question.
    pub async fn delete_question(&self, question_id: i64) -> ApiResult<()> {
        self.execute(Request::delete(format!("/questions/{question_id}")))
            .await
    }

    /// Retrieves the comments on a question.
    ///
    /// The comments endpoint returns a bare array rather than a page
    /// envelope.
    pub async fn get_question_comments(&self, question_id: i64) -> ApiResult<Vec<Comment>> {
        self.fetch_one(Request::get(format!("/questions/{question_id}/comments")))
            .await
    }

    /// Retrieves every question with its answers attached.
    ///
    /// Fetches all questions, then fetches the answers of each question
    /// that reports a non-zero answer count; questions without answers get
    /// an empty list so the field is populated on every returned question.
    pub async fn get_all_questions_and_answers(&self) -> ApiResult<Vec<Question>> {
        let mut questions = self.get_questions(&QuestionQuery::default()).await?;
        for question in &mut questions {
            if question.answer_count > 0 {
                debug!(question_id = question.id, "fetching answers for question");
                question.answers = Some(
                    self.get_answers(question.id, &Default::default()).await?,
                );
            } else {
                question.answers = Some(Vec::new());
            }
        }
        Ok(questions)
    }

    /// Retrieves every question with its answers and all comments
    /// attached.
    ///
    /// Builds on [`get_all_questions_and_answers`]
    /// (Self::get_all_questions_and_answers), then fetches the comments of
    /// each question and each answer that reports any. This is the most
    /// request-intensive composite in the library; expect roughly one
    /// request per post on the instance.
    pub async fn get_all_questions_answers_and_comments(&self) -> ApiResult<Vec<Question>> {
        let mut questions = self.get_all_questions_and_answers().await?;
        for question in &mut questions {
            if question.comment_count > 0 {
                question.comments = Some(self.get_question_comments(question.id).await?);
            } else {
                question.comments = Some(Vec::new());
            }
            if let Some(answers) = question.answers.as_mut() {
                for answer in answers {
                    if answer.comment_count > 0 {
                        answer.comments = Some(
                            self.get_answer_comments(question.id, answer.id).await?,
                        );
                    } else {
                        answer.comments = Some(Vec::new());
                    }
                }
            }
        }
        Ok(questions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_question() {
        let json = r#"{
            "id": 101,
            "title": "How do I do the thing?",
            "tags": [{"id": 1, "name": "rust"}, {"id": 2, "name": "serde"}],
            "answerCount": 2,
            "commentCount": 0,
            "isAnswered": true,
            "hasAcceptedAnswer": false,
            "creationDate": "2024-03-01T12:00:00.000Z"
        }"#;
        let question: Question = serde_json::from_str(json).unwrap();
        assert_eq!(question.id, 101);
        assert_eq!(question.tag_names(), vec!["rust", "serde"]);
        assert_eq!(question.answer_count, 2);
        assert!(question.answers.is_none());
    }

    #[test]
    fn test_serialized_question_omits_unset_composites() {
        let question: Question = serde_json::from_str(r#"{"id": 7}"#).unwrap();
        let rendered = serde_json::to_string(&question).unwrap();
        assert!(!rendered.contains("answers"));
        assert!(!rendered.contains("comments"));
    }

    #[test]
    fn test_sort_params() {
        assert_eq!(QuestionSort::Creation.as_param(), "creation");
        assert_eq!(QuestionSort::Activity.as_param(), "activity");
        assert_eq!(QuestionSort::Score.as_param(), "score");
    }
}
