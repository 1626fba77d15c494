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

//! Buses owned by the companies.

use crate::model::{AccountId, BusId};
use derive_getters::Getters;
use derive_more::Constructor;
use nuvora_core::model::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};

/// Number of seats in a bus.  Never zero.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(try_from = "u16", into = "u16")]
pub(crate) struct Capacity(u16);

impl Capacity {
    /// Creates a new capacity, making sure the bus has at least one seat.
    pub(crate) fn new(seats: u16) -> ModelResult<Self> {
        if seats == 0 {
            return Err(ModelError("Capacity must be positive".to_owned()));
        }
        Ok(Self(seats))
    }

    /// Creates a capacity from the representation used by the database.
    pub(crate) fn from_i32(seats: i32) -> ModelResult<Self> {
        match u16::try_from(seats) {
            Ok(seats) => Self::new(seats),
            Err(_) => Err(ModelError(format!("Capacity {} out of range", seats))),
        }
    }

    /// Returns the number of seats.
    pub(crate) fn as_u16(self) -> u16 {
        self.0
    }
}

impl TryFrom<u16> for Capacity {
    type Error = ModelError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Capacity::new(value)
    }
}

impl From<Capacity> for u16 {
    fn from(value: Capacity) -> Self {
        value.0
    }
}

/// A bus.
#[derive(Clone, Constructor, Debug, Getters, PartialEq)]
pub(crate) struct Bus {
    /// Identifier of the bus.
    id: BusId,

    /// Company that owns the bus.
    company_id: AccountId,

    /// Number of seats.
    capacity: Capacity,
}

impl Bus {
    /// Returns a copy of this bus with a different `capacity`.
    pub(crate) fn with_capacity(self, capacity: Capacity) -> Self {
        Self { capacity, ..self }
    }
}
