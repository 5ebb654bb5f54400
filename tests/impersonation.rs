//
//  stack-teams-api
//  tests/impersonation.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/10.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Impersonation flow against a mock server: token exchange, scoped
//! requests, and the guard rails around the feature.

use mockito::Matcher;
use serde_json::json;
use stack_teams_api::api::questions::NewQuestion;
use stack_teams_api::{ApiError, StackClient};

fn sample_question() -> NewQuestion {
    NewQuestion {
        title: "Posted on behalf".to_string(),
        body: "Body".to_string(),
        tags: vec!["migration".to_string()],
    }
}

fn exchange_success_body() -> String {
    json!({
        "items": [{
            "scope": ["write_access"],
            "exchange_type": "impersonate",
            "account_id": 3,
            "expires_on_date": 1717777554,
            "original_access_token": "service-token",
            "access_token": "imp-token",
        }],
        "has_more": false,
    })
    .to_string()
}

#[tokio::test]
async fn impersonated_question_uses_the_exchanged_token() {
    let mut server = mockito::Server::new_async().await;
    let exchange = server
        .mock("POST", "/api/2.3/access-tokens/exchange")
        .match_header("x-api-key", "service-key")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("access_tokens".into(), "service-token".into()),
            Matcher::UrlEncoded("exchange_type".into(), "impersonate".into()),
            Matcher::UrlEncoded("account_id".into(), "3".into()),
        ]))
        .with_status(200)
        .with_body(exchange_success_body())
        .expect(1)
        .create_async()
        .await;
    let post = server
        .mock("POST", "/api/v3/questions")
        .match_header("authorization", "Bearer imp-token")
        .match_body(Matcher::Json(json!({
            "title": "Posted on behalf",
            "body": "Body",
            "tags": ["migration"],
        })))
        .with_status(200)
        .with_body(json!({"id": 77, "title": "Posted on behalf"}).to_string())
        .expect(1)
        .create_async()
        .await;

    let client = StackClient::builder(server.url(), "service-token")
        .key("service-key")
        .build()
        .unwrap();
    let question = client
        .impersonate_question_by_account_id(3, &sample_question())
        .await
        .unwrap();

    assert_eq!(question.id, 77);
    exchange.assert_async().await;
    post.assert_async().await;
}

#[tokio::test]
async fn get_impersonated_user_calls_users_me_with_exchanged_token() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/2.3/access-tokens/exchange")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(exchange_success_body())
        .create_async()
        .await;
    let me = server
        .mock("GET", "/api/v3/users/me")
        .match_header("authorization", "Bearer imp-token")
        .with_status(200)
        .with_body(json!({"id": 12, "accountId": 3, "name": "Target User"}).to_string())
        .expect(1)
        .create_async()
        .await;

    let client = StackClient::builder(server.url(), "service-token")
        .key("service-key")
        .build()
        .unwrap();
    let user = client.get_impersonated_user(3).await.unwrap();

    assert_eq!(user.account_id, Some(3));
    me.assert_async().await;
}

#[tokio::test]
async fn disabled_impersonation_maps_to_auth_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/2.3/access-tokens/exchange")
        .match_query(Matcher::Any)
        .with_status(400)
        .with_body(
            r#"{"error_id": 400, "error_message": "access_tokens", "error_name": "bad_parameter"}"#,
        )
        .create_async()
        .await;

    let client = StackClient::builder(server.url(), "service-token")
        .key("service-key")
        .build()
        .unwrap();
    let err = client.acquire_impersonation_token(3).await.unwrap_err();

    match err {
        ApiError::Auth(reason) => assert!(reason.contains("not enabled")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn missing_key_fails_before_any_request() {
    let mut server = mockito::Server::new_async().await;
    let exchange = server
        .mock("POST", "/api/2.3/access-tokens/exchange")
        .expect(0)
        .create_async()
        .await;

    let client = StackClient::new(server.url(), "service-token").unwrap();
    let err = client.acquire_impersonation_token(3).await.unwrap_err();

    assert!(matches!(err, ApiError::Auth(_)));
    exchange.assert_async().await;
}

#[tokio::test]
async fn business_instances_cannot_impersonate() {
    let client =
        StackClient::new("https://stackoverflowteams.com/c/my-team", "token").unwrap();
    let err = client.acquire_impersonation_token(3).await.unwrap_err();

    match err {
        ApiError::Auth(reason) => assert!(reason.contains("Enterprise")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn impersonation_by_user_id_resolves_the_account_first() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/v3/users/12")
        .with_status(200)
        .with_body(json!({"id": 12, "accountId": 3}).to_string())
        .expect(1)
        .create_async()
        .await;
    server
        .mock("POST", "/api/2.3/access-tokens/exchange")
        .match_query(Matcher::UrlEncoded("account_id".into(), "3".into()))
        .with_status(200)
        .with_body(exchange_success_body())
        .expect(1)
        .create_async()
        .await;
    server
        .mock("POST", "/api/v3/questions")
        .match_header("authorization", "Bearer imp-token")
        .with_status(200)
        .with_body(json!({"id": 80}).to_string())
        .create_async()
        .await;

    let client = StackClient::builder(server.url(), "service-token")
        .key("service-key")
        .build()
        .unwrap();
    let question = client
        .impersonate_question_by_user_id(12, &sample_question())
        .await
        .unwrap();

    assert_eq!(question.id, 80);
}
