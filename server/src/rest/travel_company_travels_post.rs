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

//! API to schedule a travel offered by a company.

use crate::driver::Driver;
use crate::model::{AccountId, BusId, Caller, CityId, Price, TravelInfo};
use crate::rest::travels_get::TravelResponse;
use axum::extract::{Path, State};
use axum::http;
use axum::{Extension, Json};
use nuvora_core::rest::RestError;
use serde::Deserialize;
use time::OffsetDateTime;

/// Message sent to the server to schedule a travel.
#[derive(Deserialize)]
#[cfg_attr(test, derive(serde::Serialize))]
pub(crate) struct TravelRequest {
    /// Price of a ticket, in cents.
    pub(crate) price_cents: Price,

    /// Bus that performs the travel.
    pub(crate) bus_id: BusId,

    /// City the travel leaves from.
    pub(crate) departure_city_id: CityId,

    /// Time at which the travel leaves.
    #[serde(with = "time::serde::rfc3339")]
    pub(crate) departure_time: OffsetDateTime,

    /// City the travel arrives at.
    pub(crate) arrival_city_id: CityId,

    /// Time at which the travel arrives.
    #[serde(with = "time::serde::rfc3339")]
    pub(crate) arrival_time: OffsetDateTime,
}

/// Drops the sub-microsecond part of `time`, which the database cannot store.
fn truncate_to_micros(time: OffsetDateTime) -> Result<OffsetDateTime, RestError> {
    time.replace_nanosecond(time.nanosecond() / 1000 * 1000)
        .map_err(|e| RestError::InvalidRequest(format!("Invalid time {}: {}", time, e)))
}

/// POST handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Extension(caller): Extension<Caller>,
    Path(company_id): Path<AccountId>,
    Json(request): Json<TravelRequest>,
) -> Result<(http::StatusCode, Json<TravelResponse>), RestError> {
    let info = TravelInfo::new(
        request.price_cents,
        company_id,
        request.bus_id,
        request.departure_city_id,
        truncate_to_micros(request.departure_time)?,
        request.arrival_city_id,
        truncate_to_micros(request.arrival_time)?,
    )?;
    let travel = driver.create_travel(caller, info).await?;
    Ok((http::StatusCode::CREATED, Json(travel.into())))
}
