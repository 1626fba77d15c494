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

//! Extends the driver with the methods to manage the fleet of buses.

use crate::db::{BusRepository, CompanyRepository};
use crate::driver::{Driver, ensure_may_act_for, or_not_found};
use crate::model::{AccountId, Bus, BusId, Caller, Capacity};
use nuvora_core::driver::DriverResult;

impl Driver {
    /// Gets the bus `id` and checks that `caller` may modify it.
    async fn get_owned_bus(&self, caller: &Caller, id: BusId) -> DriverResult<Bus> {
        let bus = or_not_found(self.store.get_bus(id).await, "Bus")?;
        ensure_may_act_for(caller, *bus.company_id())?;
        Ok(bus)
    }

    /// Adds a new bus with `capacity` seats to the fleet of `company_id`.
    pub(crate) async fn create_bus(
        self,
        caller: Caller,
        company_id: AccountId,
        capacity: Capacity,
    ) -> DriverResult<Bus> {
        ensure_may_act_for(&caller, company_id)?;
        or_not_found(self.store.get_company(company_id).await, "Company")?;
        Ok(self.store.save_bus(company_id, capacity).await?)
    }

    /// Gets the bus `id`.
    pub(crate) async fn get_bus(self, id: BusId) -> DriverResult<Bus> {
        or_not_found(self.store.get_bus(id).await, "Bus")
    }

    /// Gets all buses.
    pub(crate) async fn get_buses(self) -> DriverResult<Vec<Bus>> {
        Ok(self.store.get_buses().await?)
    }

    /// Changes the number of seats of the bus `id`.
    pub(crate) async fn update_bus(
        self,
        caller: Caller,
        id: BusId,
        capacity: Capacity,
    ) -> DriverResult<Bus> {
        let bus = self.get_owned_bus(&caller, id).await?.with_capacity(capacity);
        or_not_found(self.store.update_bus(&bus).await, "Bus")?;
        Ok(bus)
    }

    /// Removes the bus `id` together with its travels and their tickets.
    pub(crate) async fn delete_bus(self, caller: Caller, id: BusId) -> DriverResult<()> {
        self.get_owned_bus(&caller, id).await?;
        or_not_found(self.store.delete_bus(id).await, "Bus")
    }
}
