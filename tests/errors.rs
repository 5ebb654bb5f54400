//
//  stack-teams-api
//  tests/errors.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/10.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Error surfacing against a mock server: status codes and bodies must
//! reach the caller untouched, on every verb.

use serde_json::json;
use stack_teams_api::api::questions::NewQuestion;
use stack_teams_api::{ApiError, StackClient};

fn sample_question() -> NewQuestion {
    NewQuestion {
        title: "Title".to_string(),
        body: "Body".to_string(),
        tags: vec!["tag1".to_string()],
    }
}

#[tokio::test]
async fn get_surfaces_status_and_body() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/v3/questions/999")
        .with_status(404)
        .with_body(r#"{"title":"Question not found.","status":404}"#)
        .create_async()
        .await;

    let client = StackClient::new(server.url(), "test-token").unwrap();
    let err = client.get_question_by_id(999).await.unwrap_err();

    match err {
        ApiError::Http { status, body } => {
            assert_eq!(status, 404);
            assert!(body.contains("Question not found."));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn post_surfaces_status_and_body() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/v3/questions")
        .with_status(400)
        .with_body(r#"{"title":"Tag names must be 1-35 characters."}"#)
        .create_async()
        .await;

    let client = StackClient::new(server.url(), "test-token").unwrap();
    let err = client.add_question(&sample_question()).await.unwrap_err();

    assert_eq!(err.status(), Some(400));
    assert!(err.to_string().contains("Tag names"));
}

#[tokio::test]
async fn delete_surfaces_status_and_body() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("DELETE", "/api/v3/questions/5")
        .with_status(500)
        .with_body("internal error")
        .create_async()
        .await;

    let client = StackClient::new(server.url(), "test-token").unwrap();
    let err = client.delete_question(5).await.unwrap_err();

    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn unauthorized_maps_to_auth_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/v3/users/me")
        .with_status(401)
        .with_body("Unauthorized")
        .create_async()
        .await;

    let client = StackClient::new(server.url(), "bad-token").unwrap();
    let err = client.get_myself().await.unwrap_err();

    assert!(matches!(err, ApiError::Auth(_)));
}

#[tokio::test]
async fn rate_limit_surfaces_immediately() {
    let mut server = mockito::Server::new_async().await;
    // Exactly one request: the client must not wait and retry on 429.
    server
        .mock("GET", "/api/v3/questions/1")
        .with_status(429)
        .with_body("too many requests")
        .expect(1)
        .create_async()
        .await;

    let client = StackClient::new(server.url(), "test-token").unwrap();
    let err = client.get_question_by_id(1).await.unwrap_err();

    assert_eq!(err.status(), Some(429));
}

#[tokio::test]
async fn malformed_json_maps_to_decode_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/v3/questions/1")
        .with_status(200)
        .with_body("<html>proxy login page</html>")
        .create_async()
        .await;

    let client = StackClient::new(server.url(), "test-token").unwrap();
    let err = client.get_question_by_id(1).await.unwrap_err();

    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn bearer_token_is_sent_on_every_request() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v3/questions/7")
        .match_header("authorization", "Bearer test-token")
        .with_status(200)
        .with_body(json!({"id": 7}).to_string())
        .expect(1)
        .create_async()
        .await;

    let client = StackClient::new(server.url(), "test-token").unwrap();
    let question = client.get_question_by_id(7).await.unwrap();

    assert_eq!(question.id, 7);
    mock.assert_async().await;
}

#[test]
fn bad_url_is_rejected_at_construction() {
    // A Business URL without its /c/<team> slug cannot be routed.
    let err = StackClient::new("https://stackoverflowteams.com", "token").unwrap_err();
    assert!(matches!(err, ApiError::BadUrl(_)));
}
