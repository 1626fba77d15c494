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

//! API to log in as a company with the credentials in the path.

use crate::driver::Driver;
use crate::model::{Password, PermissionLevel};
use crate::rest::customer_post::{LoginResponse, login};
use axum::Json;
use axum::extract::{Path, State};
use nuvora_core::model::EmailAddress;
use nuvora_core::rest::{EmptyBody, RestError};

/// GET handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path((email, password)): Path<(String, String)>,
    _: EmptyBody,
) -> Result<Json<LoginResponse>, RestError> {
    let email = EmailAddress::new(email)?;
    let password = Password::new(password)?;
    login(driver, email, password, PermissionLevel::COMPANY).await
}
