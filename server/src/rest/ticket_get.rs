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

//! API to get the details of a ticket.

use crate::driver::Driver;
use crate::model::{AccountId, Caller, Ticket, TicketId, TicketStatus, TravelId};
use axum::extract::{Path, State};
use axum::{Extension, Json};
use nuvora_core::rest::{EmptyBody, RestError};
use serde::Serialize;

/// Representation of a ticket in responses.
#[derive(Debug, PartialEq, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub(crate) struct TicketResponse {
    /// Identifier of the ticket.
    pub(crate) id: TicketId,

    /// Account that owns the ticket.
    pub(crate) account_id: AccountId,

    /// Travel the ticket is for.
    pub(crate) travel_id: TravelId,

    /// Payment state of the ticket.
    pub(crate) status: TicketStatus,
}

impl From<Ticket> for TicketResponse {
    fn from(ticket: Ticket) -> Self {
        Self {
            id: *ticket.id(),
            account_id: *ticket.account_id(),
            travel_id: *ticket.travel_id(),
            status: *ticket.status(),
        }
    }
}

/// Converts a list of `tickets` into their response representation.
pub(crate) fn tickets_response(tickets: Vec<Ticket>) -> Json<Vec<TicketResponse>> {
    Json(tickets.into_iter().map(TicketResponse::from).collect())
}

/// GET handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<TicketId>,
    _: EmptyBody,
) -> Result<Json<TicketResponse>, RestError> {
    let ticket = driver.get_ticket(caller, id).await?;
    Ok(Json(ticket.into()))
}
