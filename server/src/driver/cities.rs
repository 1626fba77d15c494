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

//! Extends the driver with the methods to manage cities.

use crate::db::CityRepository;
use crate::driver::Driver;
use crate::model::{City, CityName};
use nuvora_core::db::DbError;
use nuvora_core::driver::{DriverError, DriverResult};

impl Driver {
    /// Registers a new city called `name`.
    pub(crate) async fn create_city(self, name: CityName) -> DriverResult<City> {
        match self.store.save_city(&name).await {
            Ok(city) => Ok(city),
            Err(DbError::AlreadyExists) => {
                Err(DriverError::AlreadyExists("City already exists".to_owned()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Gets all cities sorted by name.
    pub(crate) async fn get_cities(self) -> DriverResult<Vec<City>> {
        Ok(self.store.get_cities().await?)
    }
}
