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

//! Test utilities for the business layer.

use crate::db::Store;
pub(crate) use crate::db::{
    AccountRepository, BusRepository, CityRepository, CompanyRepository, CustomerRepository,
    PersonRepository, TicketRepository, TravelRepository,
};
use crate::db::sqlite::SqliteStore;
use crate::db::sqlite::testutils::setup;
use crate::driver::{Driver, TokenOptions};
use crate::model::*;
use nuvora_core::clocks::testutils::SettableClock;
use nuvora_core::model::EmailAddress;
use std::sync::Arc;
use std::time::Duration;
use time::OffsetDateTime;
use time::macros::datetime;

/// Lifetime of the tokens issued by the test driver.
pub(crate) const TEST_TOKEN_LIFETIME_SECONDS: u64 = 3600;

/// Password assigned to all accounts created by the test context.
pub(crate) const TEST_PASSWORD: &str = "test0password";

/// Instant at which the test clock starts.
pub(crate) const TEST_NOW: OffsetDateTime = datetime!(2024-01-15 09:00:00 UTC);

/// State of a running test.
pub(crate) struct TestContext {
    /// The store backing the driver, for direct inspection.
    store: Arc<SqliteStore>,

    /// The clock used by the driver.
    clock: Arc<SettableClock>,

    /// The driver under test.
    driver: Driver,
}

impl TestContext {
    /// Initializes the driver using an in-memory database and a settable clock.
    pub(crate) async fn setup() -> Self {
        Self::setup_with_secret("the test secret").await
    }

    /// Same as `setup` but signs tokens with a specific `secret`.
    pub(crate) async fn setup_with_secret(secret: &str) -> Self {
        let store = Arc::from(setup().await);
        let clock = Arc::from(SettableClock::new(TEST_NOW));
        let opts = TokenOptions {
            secret: secret.to_owned(),
            expires_in: Duration::from_secs(TEST_TOKEN_LIFETIME_SECONDS),
        };
        let driver = Driver::new(store.clone(), clock.clone(), opts);
        Self { store, clock, driver }
    }

    /// Gets access to the store used by this test context.
    pub(crate) fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }

    /// Gets access to the clock used by this test context.
    pub(crate) fn clock(&self) -> &SettableClock {
        self.clock.as_ref()
    }

    /// Gets a copy of the driver in this test context.
    pub(crate) fn driver(&self) -> Driver {
        self.driver.clone()
    }

    /// Creates an account directly in the store and returns its identifier.
    async fn create_account(&self, name: &str, level: PermissionLevel) -> AccountId {
        let slug = name.to_lowercase().replace(' ', ".");
        let person = Person::new(PersonName::new(name).unwrap(), Document::new(&slug).unwrap());
        let person_id = self.store.save_person(&person).await.unwrap();
        let password = Password::from(TEST_PASSWORD).validate_and_hash(|_| None).unwrap();
        self.store
            .save_account(
                person_id,
                &EmailAddress::new(format!("{}@example.com", slug)).unwrap(),
                &password,
                level,
            )
            .await
            .unwrap()
    }

    /// Creates an admin account and returns the identity to act as it.
    pub(crate) async fn create_admin(&self, name: &str) -> Caller {
        let account_id = self.create_account(name, PermissionLevel::ADMIN).await;
        Caller { account_id, permission_level: PermissionLevel::ADMIN }
    }

    /// Creates a company and returns it together with the identity to act as it.
    pub(crate) async fn create_company(&self, name: &str) -> (Company, Caller) {
        let account_id = self.create_account(name, PermissionLevel::COMPANY).await;
        self.store.save_company(account_id).await.unwrap();
        let company = self.store.get_company(account_id).await.unwrap();
        (company, Caller { account_id, permission_level: PermissionLevel::COMPANY })
    }

    /// Creates a customer, optionally employed by `company_id`, and returns it together with the
    /// identity to act as it.
    pub(crate) async fn create_customer(
        &self,
        name: &str,
        company_id: Option<AccountId>,
    ) -> (Customer, Caller) {
        let account_id = self.create_account(name, PermissionLevel::CUSTOMER).await;
        self.store.save_customer(account_id, company_id).await.unwrap();
        let customer = self.store.get_customer(account_id).await.unwrap();
        (customer, Caller { account_id, permission_level: PermissionLevel::CUSTOMER })
    }

    /// Creates a city called `name`.
    pub(crate) async fn create_city(&self, name: &str) -> City {
        self.store.save_city(&CityName::new(name).unwrap()).await.unwrap()
    }

    /// Creates a bus with `seats` owned by `company_id`.
    pub(crate) async fn create_bus(&self, company_id: AccountId, seats: u16) -> Bus {
        self.store.save_bus(company_id, Capacity::new(seats).unwrap()).await.unwrap()
    }

    /// Creates a two-hour travel on `bus` from `from` to `to` leaving at `departure`.
    pub(crate) async fn create_travel(
        &self,
        bus: &Bus,
        from: &City,
        to: &City,
        departure: OffsetDateTime,
    ) -> Travel {
        let info = TravelInfo::new(
            Price::new(4500).unwrap(),
            *bus.company_id(),
            *bus.id(),
            *from.id(),
            departure,
            *to.id(),
            departure + time::Duration::hours(2),
        )
        .unwrap();
        self.store.save_travel(&info).await.unwrap()
    }
}
