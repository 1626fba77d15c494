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

//! API to sign up as a customer.

use crate::driver::Driver;
use crate::model::{AccountId, Customer, Document, Password, Person, PersonName};
use axum::Json;
use axum::extract::State;
use axum::http;
use nuvora_core::model::EmailAddress;
use nuvora_core::rest::RestError;
use serde::{Deserialize, Serialize};

/// Message sent to the server to create an account for a person.
#[derive(Deserialize)]
#[cfg_attr(test, derive(Serialize))]
pub(crate) struct SignupRequest {
    /// Full name of the person or legal name of the company.
    pub(crate) name: PersonName,

    /// Identity document of the person or registration number of the company.
    pub(crate) document: Document,

    /// Email address used to log in.
    pub(crate) email: EmailAddress,

    /// Password used to log in.
    pub(crate) password: Password,
}

impl SignupRequest {
    /// Splits the request into the person it describes and its credentials.
    pub(crate) fn into_parts(self) -> (Person, EmailAddress, Password) {
        (Person::new(self.name, self.document), self.email, self.password)
    }
}

/// Representation of a customer in responses.
#[derive(Debug, PartialEq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
pub(crate) struct CustomerResponse {
    /// Identifier of the customer's account.
    pub(crate) account_id: AccountId,

    /// Email address of the customer.
    pub(crate) email: EmailAddress,

    /// Full name of the customer.
    pub(crate) name: PersonName,

    /// Identity document of the customer.
    pub(crate) document: Document,

    /// Company that employs the customer, if any.
    pub(crate) company_id: Option<AccountId>,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        Self {
            account_id: *customer.account_id(),
            email: customer.email().clone(),
            name: customer.person().name().clone(),
            document: customer.person().document().clone(),
            company_id: *customer.company_id(),
        }
    }
}

/// POST handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Json(request): Json<SignupRequest>,
) -> Result<(http::StatusCode, Json<CustomerResponse>), RestError> {
    let (person, email, password) = request.into_parts();
    let customer = driver.create_customer_account(person, email, password).await?;
    Ok((http::StatusCode::CREATED, Json(customer.into())))
}
