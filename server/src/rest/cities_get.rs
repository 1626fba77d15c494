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

//! API to list all cities.

use crate::driver::Driver;
use crate::model::{City, CityId, CityName};
use axum::Json;
use axum::extract::State;
use nuvora_core::rest::{EmptyBody, RestError};
use serde::Serialize;

/// Representation of a city in responses.
#[derive(Debug, PartialEq, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub(crate) struct CityResponse {
    /// Identifier of the city.
    pub(crate) id: CityId,

    /// Name of the city.
    pub(crate) name: CityName,
}

impl From<City> for CityResponse {
    fn from(city: City) -> Self {
        Self { id: *city.id(), name: city.name().clone() }
    }
}

/// GET handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    _: EmptyBody,
) -> Result<Json<Vec<CityResponse>>, RestError> {
    let cities = driver.get_cities().await?;
    Ok(Json(cities.into_iter().map(CityResponse::from).collect()))
}
