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

//! API to change the number of seats of a bus.

use crate::driver::Driver;
use crate::model::{BusId, Caller, Capacity};
use crate::rest::bus_get::BusResponse;
use axum::extract::{Path, State};
use axum::{Extension, Json};
use nuvora_core::rest::RestError;
use serde::Deserialize;

/// Message sent to the server to update a bus.
#[derive(Deserialize)]
#[cfg_attr(test, derive(serde::Serialize))]
pub(crate) struct BusPatchRequest {
    /// New number of seats.
    pub(crate) capacity: Capacity,
}

/// PATCH handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<BusId>,
    Json(request): Json<BusPatchRequest>,
) -> Result<Json<BusResponse>, RestError> {
    let bus = driver.update_bus(caller, id, request.capacity).await?;
    Ok(Json(bus.into()))
}
