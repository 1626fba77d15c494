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

//! API to list the tickets bought by the employees of a company.

use crate::driver::Driver;
use crate::model::{AccountId, Caller};
use crate::rest::ticket_get::{TicketResponse, tickets_response};
use axum::extract::{Path, State};
use axum::{Extension, Json};
use nuvora_core::rest::{EmptyBody, RestError};

/// GET handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Extension(caller): Extension<Caller>,
    Path(company_id): Path<AccountId>,
    _: EmptyBody,
) -> Result<Json<Vec<TicketResponse>>, RestError> {
    let tickets = driver.get_employees_tickets(caller, company_id).await?;
    Ok(tickets_response(tickets))
}
