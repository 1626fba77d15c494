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

//! API to search for travels between two cities.

use crate::driver::Driver;
use crate::model::{AccountId, BusId, CityId, Price, Travel, TravelId};
use axum::Json;
use axum::extract::{Query, State};
use nuvora_core::rest::{EmptyBody, RestError};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Representation of a travel in responses.
#[derive(Debug, PartialEq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
pub(crate) struct TravelResponse {
    /// Identifier of the travel.
    pub(crate) id: TravelId,

    /// Price of a ticket, in cents.
    pub(crate) price_cents: Price,

    /// Company that offers the travel.
    pub(crate) company_id: AccountId,

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

impl From<Travel> for TravelResponse {
    fn from(travel: Travel) -> Self {
        let info = travel.info();
        Self {
            id: *travel.id(),
            price_cents: *info.price(),
            company_id: *info.company_id(),
            bus_id: *info.bus_id(),
            departure_city_id: *info.departure_city_id(),
            departure_time: *info.departure_time(),
            arrival_city_id: *info.arrival_city_id(),
            arrival_time: *info.arrival_time(),
        }
    }
}

/// Converts a list of `travels` into their response representation.
pub(crate) fn travels_response(travels: Vec<Travel>) -> Json<Vec<TravelResponse>> {
    Json(travels.into_iter().map(TravelResponse::from).collect())
}

/// Query parameters for this API.
#[derive(Deserialize)]
#[cfg_attr(test, derive(Serialize))]
pub(crate) struct SearchQuery {
    /// City to leave from.
    pub(crate) departure_city_id: CityId,

    /// City to arrive at.
    pub(crate) arrival_city_id: CityId,
}

/// GET handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Query(query): Query<SearchQuery>,
    _: EmptyBody,
) -> Result<Json<Vec<TravelResponse>>, RestError> {
    let travels = driver.search_travels(query.departure_city_id, query.arrival_city_id).await?;
    Ok(travels_response(travels))
}
