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

//! API to list the upcoming travels leaving from a city.

use crate::driver::Driver;
use crate::model::CityId;
use crate::rest::travels_get::{TravelResponse, travels_response};
use axum::Json;
use axum::extract::{Path, State};
use nuvora_core::rest::{EmptyBody, RestError};

/// GET handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(city_id): Path<CityId>,
    _: EmptyBody,
) -> Result<Json<Vec<TravelResponse>>, RestError> {
    let travels = driver.get_available_travels(city_id).await?;
    Ok(travels_response(travels))
}
