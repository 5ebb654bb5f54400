//
//  stack-teams-api
//  api/impersonation.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/10.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Impersonated operations (Enterprise only).
//!
//! These methods act as another user: each one exchanges the configured
//! API key for a short-lived token scoped to the target account, performs
//! a single operation with it, and discards it. Nothing impersonation-
//! related is ever stored on the client.
//!
//! # Overview
//!
//! - [`StackClient::impersonate_question_by_account_id`] - Post a
//!   question as the account
//! - [`StackClient::impersonate_question_by_user_id`] - Same, resolving
//!   a user ID to its account first
//! - [`StackClient::impersonate_question_by_user_email`] - Same,
//!   resolving an email address first (admin only)
//! - [`StackClient::get_impersonated_user`] - Fetch `/users/me` as the
//!   account, to verify an impersonation setup
//!
//! # Notes
//!
//! - Requires an Enterprise instance, a configured API key, and
//!   impersonation enabled by Stack Overflow support; see the
//!   [`auth`](crate::auth) module
//! - An account ID of `-1` impersonates the Community user

use tracing::info;

use crate::api::client::AuthScope;
use crate::api::common::ApiResult;
use crate::api::questions::{NewQuestion, Question};
use crate::api::users::User;
use crate::StackClient;

impl StackClient {
    /// Posts a question as the given account.
    ///
    /// Acquires a fresh impersonation token, creates the question with
    /// it, and discards the token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Auth`](crate::ApiError::Auth) when the
    /// instance is not Enterprise, no API key is configured, or
    /// impersonation is not enabled.
    pub async fn impersonate_question_by_account_id(
        &self,
        account_id: i64,
        question: &NewQuestion,
    ) -> ApiResult<Question> {
        let token = self.acquire_impersonation_token(account_id).await?;
        info!(account_id, "posting question as impersonated account");
        self.add_question_with_scope(question, AuthScope::Impersonated(token))
            .await
    }

    /// Posts a question as the account behind the given user ID.
    ///
    /// Resolves the user to their account ID first, then behaves like
    /// [`impersonate_question_by_account_id`]
    /// (Self::impersonate_question_by_account_id).
    pub async fn impersonate_question_by_user_id(
        &self,
        user_id: i64,
        question: &NewQuestion,
    ) -> ApiResult<Question> {
        let account_id = self.get_account_id_by_user_id(user_id).await?;
        self.impersonate_question_by_account_id(account_id, question)
            .await
    }

    /// Posts a question as the account behind the given email address.
    ///
    /// Resolves the email to its account ID first, which requires admin
    /// permissions.
    pub async fn impersonate_question_by_user_email(
        &self,
        email: &str,
        question: &NewQuestion,
    ) -> ApiResult<Question> {
        let account_id = self.get_account_id_by_email(email).await?;
        self.impersonate_question_by_account_id(account_id, question)
            .await
    }

    /// Fetches the user record of an impersonated account.
    ///
    /// Calls `/users/me` under a freshly exchanged token, which is the
    /// simplest way to verify that impersonation is working end to end.
    pub async fn get_impersonated_user(&self, account_id: i64) -> ApiResult<User> {
        let token = self.acquire_impersonation_token(account_id).await?;
        self.get_myself_with_scope(AuthScope::Impersonated(token))
            .await
    }
}
