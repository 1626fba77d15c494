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

//! Extends the driver with the methods to sell and manage tickets.

use crate::db::{AccountRepository, BusRepository, TicketRepository, TravelRepository};
use crate::driver::{Driver, ensure_may_act_for, or_not_found};
use crate::model::{AccountId, Caller, Ticket, TicketId, TicketStatus, Travel, TravelId};
use nuvora_core::driver::{DriverError, DriverResult};

impl Driver {
    /// Checks that `caller` may act for `account_id` and that both the account and the travel
    /// `travel_id` exist.  Returns the travel.
    async fn prepare_ticket(
        &self,
        caller: &Caller,
        account_id: AccountId,
        travel_id: TravelId,
    ) -> DriverResult<Travel> {
        ensure_may_act_for(caller, account_id)?;
        or_not_found(self.store.get_account(account_id).await, "Account")?;
        or_not_found(self.store.get_travel(travel_id).await, "Travel")
    }

    /// Gets the ticket `id` and checks that `caller` may act for its owner.
    async fn get_owned_ticket(&self, caller: &Caller, id: TicketId) -> DriverResult<Ticket> {
        let ticket = or_not_found(self.store.get_ticket(id).await, "Ticket")?;
        ensure_may_act_for(caller, *ticket.account_id())?;
        Ok(ticket)
    }

    /// Creates an unpaid ticket for `account_id` on `travel_id`.
    pub(crate) async fn create_ticket(
        self,
        caller: Caller,
        account_id: AccountId,
        travel_id: TravelId,
    ) -> DriverResult<Ticket> {
        self.prepare_ticket(&caller, account_id, travel_id).await?;
        Ok(self.store.save_ticket(account_id, travel_id, TicketStatus::NotPaid).await?)
    }

    /// Books a seat for `account_id` on `travel_id` as long as the bus has free seats left.
    pub(crate) async fn buy_ticket(
        self,
        caller: Caller,
        account_id: AccountId,
        travel_id: TravelId,
    ) -> DriverResult<Ticket> {
        let travel = self.prepare_ticket(&caller, account_id, travel_id).await?;

        let bus = or_not_found(self.store.get_bus(*travel.info().bus_id()).await, "Bus")?;
        let sold = self.store.count_active_tickets(travel_id).await?;
        if sold >= u64::from(bus.capacity().as_u16()) {
            return Err(DriverError::InvalidInput("Travel is sold out".to_owned()));
        }

        Ok(self.store.save_ticket(account_id, travel_id, TicketStatus::NotPaid).await?)
    }

    /// Gets the tickets owned by `account_id`.
    pub(crate) async fn get_purchases(
        self,
        caller: Caller,
        account_id: AccountId,
    ) -> DriverResult<Vec<Ticket>> {
        ensure_may_act_for(&caller, account_id)?;
        Ok(self.store.get_tickets_by_account(account_id).await?)
    }

    /// Gets the ticket `id`.
    pub(crate) async fn get_ticket(self, caller: Caller, id: TicketId) -> DriverResult<Ticket> {
        self.get_owned_ticket(&caller, id).await
    }

    /// Moves the ticket `id` to `status`, which must be a valid transition from its current one.
    pub(crate) async fn update_ticket_status(
        self,
        caller: Caller,
        id: TicketId,
        status: TicketStatus,
    ) -> DriverResult<Ticket> {
        let ticket = self.get_owned_ticket(&caller, id).await?;
        if !ticket.status().can_become(status) {
            return Err(DriverError::InvalidInput(format!(
                "Cannot change ticket from {} to {}",
                ticket.status().as_str(),
                status.as_str()
            )));
        }

        let ticket = ticket.with_status(status);
        or_not_found(self.store.update_ticket(&ticket).await, "Ticket")?;
        Ok(ticket)
    }

    /// Deletes the ticket `id`.
    pub(crate) async fn delete_ticket(self, caller: Caller, id: TicketId) -> DriverResult<()> {
        self.get_owned_ticket(&caller, id).await?;
        or_not_found(self.store.delete_ticket(id).await, "Ticket")
    }
}
