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

//! API to log in as a customer.

use crate::driver::Driver;
use crate::model::{
    AccessToken, Account, AccountId, Document, Password, PermissionLevel, PersonName,
};
use crate::rest::authz::REALM;
use axum::Json;
use axum::extract::State;
use nuvora_core::driver::DriverError;
use nuvora_core::model::EmailAddress;
use nuvora_core::rest::RestError;
use serde::{Deserialize, Serialize};

/// Message sent to the server to log in.
#[derive(Deserialize)]
#[cfg_attr(test, derive(Serialize))]
pub(crate) struct LoginRequest {
    /// Email address of the account.
    pub(crate) email: EmailAddress,

    /// Password of the account.
    pub(crate) password: Password,
}

/// Representation of a logged in account in responses.
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
pub(crate) struct AccountResponse {
    /// Identifier of the account.
    pub(crate) id: AccountId,

    /// Email address of the account.
    pub(crate) email: EmailAddress,

    /// Role tier of the account.
    pub(crate) permission_level: PermissionLevel,

    /// Name of the person behind the account.
    pub(crate) name: PersonName,

    /// Identity document of the person behind the account.
    pub(crate) document: Document,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: *account.id(),
            email: account.email().clone(),
            permission_level: *account.permission_level(),
            name: account.person().name().clone(),
            document: account.person().document().clone(),
        }
    }
}

/// Message returned by the server after a successful login attempt.
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
pub(crate) struct LoginResponse {
    /// Access token to authenticate further requests.
    pub(crate) access_token: AccessToken,

    /// The account that logged in.
    pub(crate) account: AccountResponse,
}

/// Logs in with `email` and `password` as an account with `role`.
///
/// Bad credentials are reported as a 401 that tells the client to come back with a bearer token.
pub(super) async fn login(
    driver: Driver,
    email: EmailAddress,
    password: Password,
    role: PermissionLevel,
) -> Result<Json<LoginResponse>, RestError> {
    match driver.login(email, password, role).await {
        Ok((access_token, account)) => {
            Ok(Json(LoginResponse { access_token, account: account.into() }))
        }
        Err(DriverError::Unauthorized(message)) => {
            Err(RestError::Unauthorized { scheme: "Bearer", realm: REALM, message })
        }
        Err(e) => Err(e.into()),
    }
}

/// POST handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, RestError> {
    login(driver, request.email, request.password, PermissionLevel::CUSTOMER).await
}
