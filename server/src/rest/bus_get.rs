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

//! API to get the details of a bus.

use crate::driver::Driver;
use crate::model::{AccountId, Bus, BusId, Capacity};
use axum::Json;
use axum::extract::{Path, State};
use nuvora_core::rest::{EmptyBody, RestError};
use serde::Serialize;

/// Representation of a bus in responses.
#[derive(Debug, PartialEq, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub(crate) struct BusResponse {
    /// Identifier of the bus.
    pub(crate) id: BusId,

    /// Company that owns the bus.
    pub(crate) company_id: AccountId,

    /// Number of seats.
    pub(crate) capacity: Capacity,
}

impl From<Bus> for BusResponse {
    fn from(bus: Bus) -> Self {
        Self { id: *bus.id(), company_id: *bus.company_id(), capacity: *bus.capacity() }
    }
}

/// GET handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(id): Path<BusId>,
    _: EmptyBody,
) -> Result<Json<BusResponse>, RestError> {
    let bus = driver.get_bus(id).await?;
    Ok(Json(bus.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::testutils::*;
    use axum::http;
    use nuvora_core::rest::testutils::OneShotBuilder;

    fn route(id: &BusId) -> (http::Method, String) {
        (http::Method::GET, format!("/bus/{}", id))
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;
        let (company, _) = context.create_company("Fast Lines").await;
        let bus = context.create_bus(*company.account_id(), 44).await;

        let response = OneShotBuilder::new(context.app(), route(bus.id()))
            .send_empty()
            .await
            .expect_json::<BusResponse>()
            .await;
        assert_eq!(BusResponse::from(bus), response);
        assert_eq!(44, response.capacity.as_u16());
    }

    #[tokio::test]
    async fn test_not_found() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route(&BusId::new(3)))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("Bus not found")
            .await;
    }
}
