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

//! API to change the payment state of a ticket.

use crate::driver::Driver;
use crate::model::{Caller, TicketId, TicketStatus};
use crate::rest::ticket_get::TicketResponse;
use axum::extract::{Path, State};
use axum::{Extension, Json};
use nuvora_core::rest::RestError;
use serde::Deserialize;

/// Message sent to the server to change the state of a ticket.
#[derive(Deserialize)]
#[cfg_attr(test, derive(serde::Serialize))]
pub(crate) struct TicketPatchRequest {
    /// New payment state of the ticket.
    pub(crate) status: TicketStatus,
}

/// PATCH handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<TicketId>,
    Json(request): Json<TicketPatchRequest>,
) -> Result<Json<TicketResponse>, RestError> {
    let ticket = driver.update_ticket_status(caller, id, request.status).await?;
    Ok(Json(ticket.into()))
}
