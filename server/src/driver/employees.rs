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

//! Extends the driver with the methods to manage the employees of a company.

use crate::db::{CompanyRepository, CustomerRepository, TicketRepository};
use crate::driver::{Driver, ensure_may_act_for, or_not_found};
use crate::model::{AccountId, Caller, Customer, Password, PermissionLevel, Person, Ticket};
use nuvora_core::driver::DriverResult;
use nuvora_core::model::EmailAddress;

impl Driver {
    /// Checks that `caller` may manage `company_id` and that the company exists.
    async fn ensure_company(&self, caller: &Caller, company_id: AccountId) -> DriverResult<()> {
        ensure_may_act_for(caller, company_id)?;
        or_not_found(self.store.get_company(company_id).await, "Company")?;
        Ok(())
    }

    /// Gets the customers employed by `company_id`.
    pub(crate) async fn get_employees(
        self,
        caller: Caller,
        company_id: AccountId,
    ) -> DriverResult<Vec<Customer>> {
        self.ensure_company(&caller, company_id).await?;
        Ok(self.store.get_customers_by_company(company_id).await?)
    }

    /// Creates a new customer account employed by `company_id`.
    pub(crate) async fn create_employee(
        self,
        caller: Caller,
        company_id: AccountId,
        person: Person,
        email: EmailAddress,
        password: Password,
    ) -> DriverResult<Customer> {
        self.ensure_company(&caller, company_id).await?;

        let account_id =
            self.create_account(person, email, password, PermissionLevel::CUSTOMER).await?;
        self.store.save_customer(account_id, Some(company_id)).await?;
        Ok(self.store.get_customer(account_id).await?)
    }

    /// Gets the tickets owned by the customers employed by `company_id`.
    pub(crate) async fn get_employees_tickets(
        self,
        caller: Caller,
        company_id: AccountId,
    ) -> DriverResult<Vec<Ticket>> {
        self.ensure_company(&caller, company_id).await?;
        Ok(self.store.get_tickets_by_company(company_id).await?)
    }
}
