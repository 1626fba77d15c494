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

//! API to register a city.

use crate::driver::Driver;
use crate::model::CityName;
use crate::rest::cities_get::CityResponse;
use axum::extract::{Path, State};
use axum::{Json, http};
use nuvora_core::rest::{EmptyBody, RestError};

/// POST handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(name): Path<String>,
    _: EmptyBody,
) -> Result<(http::StatusCode, Json<CityResponse>), RestError> {
    let name = CityName::new(name)?;
    let city = driver.create_city(name).await?;
    Ok((http::StatusCode::CREATED, Json(city.into())))
}
