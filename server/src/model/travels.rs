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

//! Travels offered by the companies.

use crate::model::{AccountId, BusId, CityId, TravelId};
use derive_getters::Getters;
use nuvora_core::model::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Price of a travel, in cents.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(try_from = "i64", into = "i64")]
pub(crate) struct Price(i64);

impl Price {
    /// Creates a new price from an amount of `cents`, which cannot be negative.
    pub(crate) fn new(cents: i64) -> ModelResult<Self> {
        if cents < 0 {
            return Err(ModelError("Price cannot be negative".to_owned()));
        }
        Ok(Self(cents))
    }

    /// Returns the price in cents.
    pub(crate) fn as_cents(self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for Price {
    type Error = ModelError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Price::new(value)
    }
}

impl From<Price> for i64 {
    fn from(value: Price) -> Self {
        value.0
    }
}

/// Details of a travel, before or after it has been persisted.
///
/// Travels always connect two different cities and arrive after they depart.
#[derive(Clone, Debug, Getters, PartialEq)]
pub(crate) struct TravelInfo {
    /// Price of a ticket for this travel.
    price: Price,

    /// Company that offers the travel.
    company_id: AccountId,

    /// Bus that performs the travel.
    bus_id: BusId,

    /// City the travel leaves from.
    departure_city_id: CityId,

    /// Time at which the travel leaves.
    departure_time: OffsetDateTime,

    /// City the travel arrives at.
    arrival_city_id: CityId,

    /// Time at which the travel arrives.
    arrival_time: OffsetDateTime,
}

impl TravelInfo {
    /// Creates the details of a travel, validating their consistency.
    pub(crate) fn new(
        price: Price,
        company_id: AccountId,
        bus_id: BusId,
        departure_city_id: CityId,
        departure_time: OffsetDateTime,
        arrival_city_id: CityId,
        arrival_time: OffsetDateTime,
    ) -> ModelResult<Self> {
        if departure_city_id == arrival_city_id {
            return Err(ModelError("Departure and arrival cities must differ".to_owned()));
        }
        if arrival_time <= departure_time {
            return Err(ModelError("Arrival time must be after departure time".to_owned()));
        }
        Ok(Self {
            price,
            company_id,
            bus_id,
            departure_city_id,
            departure_time,
            arrival_city_id,
            arrival_time,
        })
    }
}

/// A persisted travel.
#[derive(Clone, Debug, Getters, PartialEq)]
pub(crate) struct Travel {
    /// Identifier of the travel.
    id: TravelId,

    /// Details of the travel.
    info: TravelInfo,
}

impl Travel {
    /// Attaches an identifier to the details of a travel.
    pub(crate) fn new(id: TravelId, info: TravelInfo) -> Self {
        Self { id, info }
    }
}
