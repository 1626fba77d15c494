// III-IV
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! API to log in as a company.

use crate::driver::Driver;
use crate::model::PermissionLevel;
use crate::rest::customer_post::{LoginRequest, LoginResponse, login};
use axum::Json;
use axum::extract::State;
use nuvora_core::rest::RestError;

/// POST handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, RestError> {
    login(driver, request.email, request.password, PermissionLevel::COMPANY).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::testutils::TEST_PASSWORD;
    use crate::model::Password;
    use crate::rest::testutils::*;
    use axum::http;
    use nuvora_core::model::EmailAddress;
    use nuvora_core::rest::testutils::OneShotBuilder;
    use nuvora_core::test_payload_must_be_json;

    fn route() -> (http::Method, String) {
        (http::Method::POST, "/company".to_owned())
    }

    /// Builds a login request for `email` and `password`.
    fn request(email: &str, password: &'static str) -> LoginRequest {
        LoginRequest { email: EmailAddress::from(email), password: Password::from(password) }
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;
        let (company, _) = context.create_company("Fast Lines").await;

        let response = OneShotBuilder::new(context.app(), route())
            .send_json(request("fast.lines@example.com", TEST_PASSWORD))
            .await
            .expect_json::<LoginResponse>()
            .await;
        assert_eq!(*company.account_id(), response.account.id);
        assert_eq!(PermissionLevel::COMPANY, response.account.permission_level);
    }

    #[tokio::test]
    async fn test_invalid_password() {
        let context = TestContext::setup().await;
        context.create_company("Fast Lines").await;

        OneShotBuilder::new(context.app(), route())
            .send_json(request("fast.lines@example.com", "wrong0password"))
            .await
            .expect_status(http::StatusCode::UNAUTHORIZED)
            .expect_error("^Unauthorized: Invalid password$")
            .await;
    }

    #[tokio::test]
    async fn test_customer_cannot_log_in_as_company() {
        let context = TestContext::setup().await;
        context.create_customer("Jane Doe", None).await;

        OneShotBuilder::new(context.app(), route())
            .send_json(request("jane.doe@example.com", TEST_PASSWORD))
            .await
            .expect_status(http::StatusCode::UNAUTHORIZED)
            .expect_error("Login not allowed for this role")
            .await;
    }

    #[tokio::test]
    async fn test_admin_can_log_in() {
        let context = TestContext::setup().await;
        let admin = context.create_admin("Root").await;

        let response = OneShotBuilder::new(context.app(), route())
            .send_json(request("root@example.com", TEST_PASSWORD))
            .await
            .expect_json::<LoginResponse>()
            .await;
        assert_eq!(admin.account_id, response.account.id);
        assert_eq!(PermissionLevel::ADMIN, response.account.permission_level);
    }

    test_payload_must_be_json!(TestContext::setup().await.into_app(), route());
}
