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

//! API to list all travel companies.

use crate::driver::Driver;
use crate::model::{AccountId, Company, Document, PersonName};
use axum::Json;
use axum::extract::State;
use nuvora_core::model::EmailAddress;
use nuvora_core::rest::{EmptyBody, RestError};
use serde::Serialize;

/// Representation of a company in responses.
#[derive(Debug, PartialEq, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub(crate) struct CompanyResponse {
    /// Identifier of the company's account.
    pub(crate) account_id: AccountId,

    /// Email address of the company.
    pub(crate) email: EmailAddress,

    /// Legal name of the company.
    pub(crate) name: PersonName,

    /// Registration number of the company.
    pub(crate) document: Document,
}

impl From<Company> for CompanyResponse {
    fn from(company: Company) -> Self {
        Self {
            account_id: *company.account_id(),
            email: company.email().clone(),
            name: company.person().name().clone(),
            document: company.person().document().clone(),
        }
    }
}

/// GET handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    _: EmptyBody,
) -> Result<Json<Vec<CompanyResponse>>, RestError> {
    let companies = driver.get_companies().await?;
    Ok(Json(companies.into_iter().map(CompanyResponse::from).collect()))
}
