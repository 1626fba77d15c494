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

//! Extends the driver with the methods to manage accounts.

use crate::db::{AccountRepository, CompanyRepository, CustomerRepository, PersonRepository};
use crate::driver::Driver;
use crate::model::{
    AccessToken, Account, AccountId, Company, Customer, Password, PermissionLevel, Person,
};
use log::warn;
use nuvora_core::db::DbError;
use nuvora_core::driver::{DriverError, DriverResult};
use nuvora_core::model::EmailAddress;

/// Verifies that a password is sufficiently complex.
pub(super) fn password_validator(s: &str) -> Option<&'static str> {
    if s.len() < 8 {
        return Some("Too short");
    }

    let alphabetic = s.chars().any(char::is_alphabetic);
    let numeric = s.chars().any(char::is_numeric);
    if !alphabetic || !numeric {
        return Some("Must contain letters and numbers");
    }

    None
}

impl Driver {
    /// Creates the person and the account that make up a new user with `permission_level`.
    ///
    /// The role-specific row is left to the caller.
    pub(super) async fn create_account(
        &self,
        person: Person,
        email: EmailAddress,
        password: Password,
        permission_level: PermissionLevel,
    ) -> DriverResult<AccountId> {
        let password = password.validate_and_hash(password_validator)?;

        match self.store.get_account_by_email(&email).await {
            Ok(_) => {
                return Err(DriverError::AlreadyExists(
                    "Email address is already registered".to_owned(),
                ));
            }
            Err(DbError::NotFound) => (),
            Err(e) => return Err(e.into()),
        }

        let person_id = match self.store.save_person(&person).await {
            Ok(id) => id,
            Err(DbError::AlreadyExists) => {
                return Err(DriverError::AlreadyExists(
                    "Document is already registered".to_owned(),
                ));
            }
            Err(e) => return Err(e.into()),
        };

        match self.store.save_account(person_id, &email, &password, permission_level).await {
            Ok(id) => Ok(id),
            Err(e) => {
                warn!("Person {} left without an account: {}", person_id, e);
                match e {
                    DbError::AlreadyExists => Err(DriverError::AlreadyExists(
                        "Email address is already registered".to_owned(),
                    )),
                    e => Err(e.into()),
                }
            }
        }
    }

    /// Signs up a new customer that is not employed by any company.
    pub(crate) async fn create_customer_account(
        self,
        person: Person,
        email: EmailAddress,
        password: Password,
    ) -> DriverResult<Customer> {
        let account_id =
            self.create_account(person, email, password, PermissionLevel::CUSTOMER).await?;
        self.store.save_customer(account_id, None).await?;
        Ok(self.store.get_customer(account_id).await?)
    }

    /// Registers a new company.
    pub(crate) async fn create_company_account(
        self,
        person: Person,
        email: EmailAddress,
        password: Password,
    ) -> DriverResult<Company> {
        let account_id =
            self.create_account(person, email, password, PermissionLevel::COMPANY).await?;
        self.store.save_company(account_id).await?;
        Ok(self.store.get_company(account_id).await?)
    }

    /// Logs in the account identified by `email` and `password`, which must hold the `role`
    /// permission level or be an admin, and issues an access token for it.
    pub(crate) async fn login(
        self,
        email: EmailAddress,
        password: Password,
        role: PermissionLevel,
    ) -> DriverResult<(AccessToken, Account)> {
        let account = match self.store.get_account_by_email(&email).await {
            Ok(account) => account,
            Err(DbError::NotFound) => {
                return Err(DriverError::Unauthorized("Unknown user".to_owned()));
            }
            Err(e) => return Err(e.into()),
        };

        if !password.verify(account.password())? {
            return Err(DriverError::Unauthorized("Invalid password".to_owned()));
        }

        let level = *account.permission_level();
        if level != role && level != PermissionLevel::ADMIN {
            return Err(DriverError::Unauthorized("Login not allowed for this role".to_owned()));
        }

        let access_token = self.issue_token(&account)?;
        Ok((access_token, account))
    }

    /// Gets all companies.
    pub(crate) async fn get_companies(self) -> DriverResult<Vec<Company>> {
        Ok(self.store.get_companies().await?)
    }
}
