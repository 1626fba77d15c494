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

//! Cities served by the travels.

use crate::model::CityId;
use derive_getters::Getters;
use derive_more::Constructor;
use nuvora_core::model::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};

/// Maximum length of a city name per the schema.
const MAX_CITY_NAME_LENGTH: usize = 64;

/// Name of a city.  Unique across all cities.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(try_from = "String", into = "String")]
pub(crate) struct CityName(String);

impl CityName {
    /// Creates a new name from an untrusted string `s`, making sure it is valid.
    pub(crate) fn new<S: Into<String>>(s: S) -> ModelResult<Self> {
        let s = s.into();
        let s = s.trim();
        if s.is_empty() {
            return Err(ModelError("City name cannot be empty".to_owned()));
        }
        if s.len() > MAX_CITY_NAME_LENGTH {
            return Err(ModelError("City name is too long".to_owned()));
        }
        if s.chars().any(char::is_control) {
            return Err(ModelError("City name cannot contain control characters".to_owned()));
        }
        Ok(Self(s.to_owned()))
    }

    /// Returns a string view of the name.
    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CityName {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        CityName::new(value)
    }
}

impl From<CityName> for String {
    fn from(value: CityName) -> Self {
        value.0
    }
}

/// A city.
#[derive(Clone, Constructor, Debug, Getters, PartialEq)]
pub(crate) struct City {
    /// Identifier of the city.
    id: CityId,

    /// Name of the city.
    name: CityName,
}
