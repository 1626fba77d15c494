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

//! API to add a bus to the fleet of a company.

use crate::driver::Driver;
use crate::model::{AccountId, Caller, Capacity};
use crate::rest::bus_get::BusResponse;
use axum::extract::State;
use axum::http;
use axum::{Extension, Json};
use nuvora_core::rest::RestError;
use serde::Deserialize;

/// Message sent to the server to add a bus.
#[derive(Deserialize)]
#[cfg_attr(test, derive(serde::Serialize))]
pub(crate) struct BusRequest {
    /// Company that will own the bus.
    pub(crate) company_id: AccountId,

    /// Number of seats.
    pub(crate) capacity: Capacity,
}

/// POST handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Extension(caller): Extension<Caller>,
    Json(request): Json<BusRequest>,
) -> Result<(http::StatusCode, Json<BusResponse>), RestError> {
    let bus = driver.create_bus(caller, request.company_id, request.capacity).await?;
    Ok((http::StatusCode::CREATED, Json(bus.into())))
}
