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

//! API to register a travel company.

use crate::driver::Driver;
use crate::rest::companies_get::CompanyResponse;
use crate::rest::customer_signup_post::SignupRequest;
use axum::Json;
use axum::extract::State;
use axum::http;
use nuvora_core::rest::RestError;

/// POST handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Json(request): Json<SignupRequest>,
) -> Result<(http::StatusCode, Json<CompanyResponse>), RestError> {
    let (person, email, password) = request.into_parts();
    let company = driver.create_company_account(person, email, password).await?;
    Ok((http::StatusCode::CREATED, Json(company.into())))
}
