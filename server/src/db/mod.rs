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

//! Database abstraction in terms of the operations needed by the booking service.
//!
//! Every entity has its own repository trait and `Store` groups all of them.  Each operation is
//! an independent unit of work: there are no transactions spanning more than one call.

use crate::model::*;
use async_trait::async_trait;
use nuvora_core::db::{DbError, DbResult};
use nuvora_core::model::EmailAddress;
use time::OffsetDateTime;

pub(crate) mod postgres;
#[cfg(test)]
pub(crate) mod sqlite;

/// Persistence of people.
#[async_trait]
pub(crate) trait PersonRepository: Send + Sync {
    /// Creates a new `person` and returns its identifier.
    async fn save_person(&self, person: &Person) -> DbResult<PersonId>;

    /// Gets the person identified by `id`.
    async fn get_person(&self, id: PersonId) -> DbResult<Person>;
}

/// Persistence of accounts.
#[async_trait]
pub(crate) trait AccountRepository: Send + Sync {
    /// Creates a new account for the person `person_id` and returns its identifier.
    async fn save_account(
        &self,
        person_id: PersonId,
        email: &EmailAddress,
        password: &HashedPassword,
        permission_level: PermissionLevel,
    ) -> DbResult<AccountId>;

    /// Gets the account identified by `id`.
    async fn get_account(&self, id: AccountId) -> DbResult<Account>;

    /// Gets the account that logs in with `email`.
    async fn get_account_by_email(&self, email: &EmailAddress) -> DbResult<Account>;
}

/// Persistence of customers.
#[async_trait]
pub(crate) trait CustomerRepository: Send + Sync {
    /// Marks `account_id` as a customer, optionally employed by `company_id`.
    async fn save_customer(
        &self,
        account_id: AccountId,
        company_id: Option<AccountId>,
    ) -> DbResult<()>;

    /// Gets the customer behind `account_id`.
    async fn get_customer(&self, account_id: AccountId) -> DbResult<Customer>;

    /// Gets all customers employed by `company_id`.
    async fn get_customers_by_company(&self, company_id: AccountId) -> DbResult<Vec<Customer>>;
}

/// Persistence of companies.
#[async_trait]
pub(crate) trait CompanyRepository: Send + Sync {
    /// Marks `account_id` as a company.
    async fn save_company(&self, account_id: AccountId) -> DbResult<()>;

    /// Gets the company behind `account_id`.
    async fn get_company(&self, account_id: AccountId) -> DbResult<Company>;

    /// Gets all companies.
    async fn get_companies(&self) -> DbResult<Vec<Company>>;
}

/// Persistence of buses.
#[async_trait]
pub(crate) trait BusRepository: Send + Sync {
    /// Creates a new bus owned by `company_id`.
    async fn save_bus(&self, company_id: AccountId, capacity: Capacity) -> DbResult<Bus>;

    /// Gets the bus identified by `id`.
    async fn get_bus(&self, id: BusId) -> DbResult<Bus>;

    /// Gets all buses.
    async fn get_buses(&self) -> DbResult<Vec<Bus>>;

    /// Replaces the mutable properties of an existing `bus`.
    async fn update_bus(&self, bus: &Bus) -> DbResult<()>;

    /// Deletes the bus identified by `id` together with its travels and their tickets.
    async fn delete_bus(&self, id: BusId) -> DbResult<()>;
}

/// Persistence of cities.
#[async_trait]
pub(crate) trait CityRepository: Send + Sync {
    /// Creates a new city called `name`.
    async fn save_city(&self, name: &CityName) -> DbResult<City>;

    /// Gets the city identified by `id`.
    async fn get_city(&self, id: CityId) -> DbResult<City>;

    /// Gets all cities sorted by name.
    async fn get_cities(&self) -> DbResult<Vec<City>>;
}

/// Persistence of travels.
#[async_trait]
pub(crate) trait TravelRepository: Send + Sync {
    /// Creates a new travel described by `info`.
    async fn save_travel(&self, info: &TravelInfo) -> DbResult<Travel>;

    /// Gets the travel identified by `id`.
    async fn get_travel(&self, id: TravelId) -> DbResult<Travel>;

    /// Gets all travels from `departure_city_id` to `arrival_city_id` sorted by departure time.
    async fn get_travels_between(
        &self,
        departure_city_id: CityId,
        arrival_city_id: CityId,
    ) -> DbResult<Vec<Travel>>;

    /// Gets all travels leaving `city_id` strictly after `after` sorted by departure time.
    async fn get_travels_departing_from(
        &self,
        city_id: CityId,
        after: OffsetDateTime,
    ) -> DbResult<Vec<Travel>>;
}

/// Persistence of tickets.
#[async_trait]
pub(crate) trait TicketRepository: Send + Sync {
    /// Creates a new ticket for `travel_id` owned by `account_id`.
    async fn save_ticket(
        &self,
        account_id: AccountId,
        travel_id: TravelId,
        status: TicketStatus,
    ) -> DbResult<Ticket>;

    /// Gets the ticket identified by `id`.
    async fn get_ticket(&self, id: TicketId) -> DbResult<Ticket>;

    /// Gets all tickets owned by `account_id`.
    async fn get_tickets_by_account(&self, account_id: AccountId) -> DbResult<Vec<Ticket>>;

    /// Gets all tickets owned by the customers employed by `company_id`.
    async fn get_tickets_by_company(&self, company_id: AccountId) -> DbResult<Vec<Ticket>>;

    /// Counts the tickets for `travel_id` that still hold a seat.
    async fn count_active_tickets(&self, travel_id: TravelId) -> DbResult<u64>;

    /// Replaces the status of an existing `ticket`.
    async fn update_ticket(&self, ticket: &Ticket) -> DbResult<()>;

    /// Deletes the ticket identified by `id`.
    async fn delete_ticket(&self, id: TicketId) -> DbResult<()>;
}

/// All the persistence needs of the service.
#[async_trait]
pub(crate) trait Store:
    PersonRepository
    + AccountRepository
    + CustomerRepository
    + CompanyRepository
    + BusRepository
    + CityRepository
    + TravelRepository
    + TicketRepository
{
    /// Applies the schema to the database.  Safe to call on an already-initialized database.
    async fn migrate(&self) -> DbResult<()>;

    /// Closes all connections to the database.
    async fn close(&self);
}

/// Checks that a write that targets a single row by its key touched exactly one row.
fn expect_one_row(rows_affected: u64, what: &str) -> DbResult<()> {
    match rows_affected {
        0 => Err(DbError::NotFound),
        1 => Ok(()),
        _ => Err(DbError::BackendError(format!("{} affected more than one row", what))),
    }
}
