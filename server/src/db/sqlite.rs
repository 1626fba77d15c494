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

//! Implementation of the database abstraction using SQLite.

use crate::db::{
    AccountRepository, BusRepository, CityRepository, CompanyRepository, CustomerRepository,
    PersonRepository, Store, TicketRepository, TravelRepository, expect_one_row,
};
use crate::model::*;
use async_trait::async_trait;
use futures::TryStreamExt;
use nuvora_core::db::sqlite::{SqliteDb, build_timestamp, map_sqlx_error, unpack_timestamp};
use nuvora_core::db::{DbError, DbResult};
use nuvora_core::model::EmailAddress;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use time::OffsetDateTime;

/// Schema to use to initialize the test database.
const SCHEMA: &str = include_str!("sqlite.sql");

/// Columns to query to build an `Account`.
const ACCOUNT_COLUMNS: &str = "
    a.id, a.email, a.password, a.permission_level, p.name, p.document
    FROM accounts a JOIN persons p ON p.id = a.person_id
";

/// Columns to query to build a `Customer`.
const CUSTOMER_COLUMNS: &str = "
    c.account_id, c.company_id, a.email, p.name, p.document
    FROM customers c
    JOIN accounts a ON a.id = c.account_id
    JOIN persons p ON p.id = a.person_id
";

/// Columns to query to build a `Company`.
const COMPANY_COLUMNS: &str = "
    c.account_id, a.email, p.name, p.document
    FROM companies c
    JOIN accounts a ON a.id = c.account_id
    JOIN persons p ON p.id = a.person_id
";

/// Columns to query to build a `Travel`.
const TRAVEL_COLUMNS: &str = "
    id, price_cents, account_id, bus_id,
    departure_city_id, departure_time_secs, departure_time_nsecs,
    arrival_city_id, arrival_time_secs, arrival_time_nsecs
    FROM travels
";

/// Extracts the `name` and `document` columns of `row` into a `Person`.
fn person_from_row(row: &SqliteRow) -> DbResult<Person> {
    let name: String = row.try_get("name").map_err(map_sqlx_error)?;
    let document: String = row.try_get("document").map_err(map_sqlx_error)?;
    Ok(Person::new(PersonName::new(name)?, Document::new(document)?))
}

/// Extracts the timestamp stored in the `<prefix>_secs` and `<prefix>_nsecs` columns of `row`.
fn timestamp_from_row(row: &SqliteRow, prefix: &str) -> DbResult<OffsetDateTime> {
    let secs: i64 = row.try_get(format!("{}_secs", prefix).as_str()).map_err(map_sqlx_error)?;
    let nsecs: i64 = row.try_get(format!("{}_nsecs", prefix).as_str()).map_err(map_sqlx_error)?;
    build_timestamp(secs, nsecs)
}

impl TryFrom<SqliteRow> for Account {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(map_sqlx_error)?;
        let email: String = row.try_get("email").map_err(map_sqlx_error)?;
        let password: String = row.try_get("password").map_err(map_sqlx_error)?;
        let permission_level: i16 = row.try_get("permission_level").map_err(map_sqlx_error)?;

        Ok(Account::new(
            AccountId::new(id),
            EmailAddress::new(email)?,
            HashedPassword::new(password),
            PermissionLevel::from_i16(permission_level)?,
            person_from_row(&row)?,
        ))
    }
}

impl TryFrom<SqliteRow> for Customer {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let account_id: i64 = row.try_get("account_id").map_err(map_sqlx_error)?;
        let company_id: Option<i64> = row.try_get("company_id").map_err(map_sqlx_error)?;
        let email: String = row.try_get("email").map_err(map_sqlx_error)?;

        Ok(Customer::new(
            AccountId::new(account_id),
            EmailAddress::new(email)?,
            person_from_row(&row)?,
            company_id.map(AccountId::new),
        ))
    }
}

impl TryFrom<SqliteRow> for Company {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let account_id: i64 = row.try_get("account_id").map_err(map_sqlx_error)?;
        let email: String = row.try_get("email").map_err(map_sqlx_error)?;

        Ok(Company::new(
            AccountId::new(account_id),
            EmailAddress::new(email)?,
            person_from_row(&row)?,
        ))
    }
}

impl TryFrom<SqliteRow> for Bus {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(map_sqlx_error)?;
        let company_id: i64 = row.try_get("company_id").map_err(map_sqlx_error)?;
        let capacity: i32 = row.try_get("capacity").map_err(map_sqlx_error)?;

        Ok(Bus::new(BusId::new(id), AccountId::new(company_id), Capacity::from_i32(capacity)?))
    }
}

impl TryFrom<SqliteRow> for City {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(map_sqlx_error)?;
        let name: String = row.try_get("name").map_err(map_sqlx_error)?;

        Ok(City::new(CityId::new(id), CityName::new(name)?))
    }
}

impl TryFrom<SqliteRow> for Travel {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(map_sqlx_error)?;
        let price_cents: i64 = row.try_get("price_cents").map_err(map_sqlx_error)?;
        let account_id: i64 = row.try_get("account_id").map_err(map_sqlx_error)?;
        let bus_id: i64 = row.try_get("bus_id").map_err(map_sqlx_error)?;
        let departure_city_id: i64 = row.try_get("departure_city_id").map_err(map_sqlx_error)?;
        let arrival_city_id: i64 = row.try_get("arrival_city_id").map_err(map_sqlx_error)?;

        let info = TravelInfo::new(
            Price::new(price_cents)?,
            AccountId::new(account_id),
            BusId::new(bus_id),
            CityId::new(departure_city_id),
            timestamp_from_row(&row, "departure_time")?,
            CityId::new(arrival_city_id),
            timestamp_from_row(&row, "arrival_time")?,
        )?;
        Ok(Travel::new(TravelId::new(id), info))
    }
}

impl TryFrom<SqliteRow> for Ticket {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(map_sqlx_error)?;
        let account_id: i64 = row.try_get("account_id").map_err(map_sqlx_error)?;
        let travel_id: i64 = row.try_get("travel_id").map_err(map_sqlx_error)?;
        let status: String = row.try_get("status").map_err(map_sqlx_error)?;

        Ok(Ticket::new(
            TicketId::new(id),
            AccountId::new(account_id),
            TravelId::new(travel_id),
            TicketStatus::parse(&status)?,
        ))
    }
}

/// Store backed by an SQLite database.
pub(crate) struct SqliteStore {
    /// Connection pool to the database.
    db: SqliteDb,
}

impl From<SqliteDb> for SqliteStore {
    fn from(db: SqliteDb) -> Self {
        Self { db }
    }
}

impl SqliteStore {
    /// Runs `query_str`, binding `ids` in order, and decodes all returned rows as `T`.
    async fn fetch_all_by_ids<T>(&self, query_str: &str, ids: &[i64]) -> DbResult<Vec<T>>
    where
        T: TryFrom<SqliteRow, Error = DbError>,
    {
        let mut conn = self.db.acquire().await?;
        let mut query = sqlx::query(query_str);
        for id in ids {
            query = query.bind(*id);
        }
        let mut rows = query.fetch(&mut *conn);

        let mut entities = vec![];
        while let Some(row) = rows.try_next().await.map_err(map_sqlx_error)? {
            entities.push(T::try_from(row)?);
        }
        Ok(entities)
    }

    /// Runs `query_str` with a single `id` argument and decodes the one returned row as `T`.
    async fn fetch_one_by_id<T>(&self, query_str: &str, id: i64) -> DbResult<T>
    where
        T: TryFrom<SqliteRow, Error = DbError>,
    {
        let mut conn = self.db.acquire().await?;
        let row = sqlx::query(query_str)
            .bind(id)
            .fetch_one(&mut *conn)
            .await
            .map_err(map_sqlx_error)?;
        T::try_from(row)
    }
}

#[async_trait]
impl PersonRepository for SqliteStore {
    async fn save_person(&self, person: &Person) -> DbResult<PersonId> {
        let mut conn = self.db.acquire().await?;

        let query_str = "INSERT INTO persons (name, document) VALUES (?, ?) RETURNING id";
        let row = sqlx::query(query_str)
            .bind(person.name().as_str())
            .bind(person.document().as_str())
            .fetch_one(&mut *conn)
            .await
            .map_err(map_sqlx_error)?;
        let id: i64 = row.try_get("id").map_err(map_sqlx_error)?;
        Ok(PersonId::new(id))
    }

    async fn get_person(&self, id: PersonId) -> DbResult<Person> {
        let mut conn = self.db.acquire().await?;

        let query_str = "SELECT name, document FROM persons WHERE id = ?";
        let row = sqlx::query(query_str)
            .bind(id.as_i64())
            .fetch_one(&mut *conn)
            .await
            .map_err(map_sqlx_error)?;
        person_from_row(&row)
    }
}

#[async_trait]
impl AccountRepository for SqliteStore {
    async fn save_account(
        &self,
        person_id: PersonId,
        email: &EmailAddress,
        password: &HashedPassword,
        permission_level: PermissionLevel,
    ) -> DbResult<AccountId> {
        let mut conn = self.db.acquire().await?;

        let query_str = "
            INSERT INTO accounts (person_id, email, password, permission_level)
            VALUES (?, ?, ?, ?)
            RETURNING id
        ";
        let row = sqlx::query(query_str)
            .bind(person_id.as_i64())
            .bind(email.as_str())
            .bind(password.as_str())
            .bind(permission_level.as_i16())
            .fetch_one(&mut *conn)
            .await
            .map_err(map_sqlx_error)?;
        let id: i64 = row.try_get("id").map_err(map_sqlx_error)?;
        Ok(AccountId::new(id))
    }

    async fn get_account(&self, id: AccountId) -> DbResult<Account> {
        let query_str = format!("SELECT {} WHERE a.id = ?", ACCOUNT_COLUMNS);
        self.fetch_one_by_id(&query_str, id.as_i64()).await
    }

    async fn get_account_by_email(&self, email: &EmailAddress) -> DbResult<Account> {
        let mut conn = self.db.acquire().await?;

        let query_str = format!("SELECT {} WHERE a.email = ?", ACCOUNT_COLUMNS);
        let row = sqlx::query(&query_str)
            .bind(email.as_str())
            .fetch_one(&mut *conn)
            .await
            .map_err(map_sqlx_error)?;
        Account::try_from(row)
    }
}

#[async_trait]
impl CustomerRepository for SqliteStore {
    async fn save_customer(
        &self,
        account_id: AccountId,
        company_id: Option<AccountId>,
    ) -> DbResult<()> {
        let mut conn = self.db.acquire().await?;

        let query_str = "INSERT INTO customers (account_id, company_id) VALUES (?, ?)";
        sqlx::query(query_str)
            .bind(account_id.as_i64())
            .bind(company_id.map(AccountId::as_i64))
            .execute(&mut *conn)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }

    async fn get_customer(&self, account_id: AccountId) -> DbResult<Customer> {
        let query_str = format!("SELECT {} WHERE c.account_id = ?", CUSTOMER_COLUMNS);
        self.fetch_one_by_id(&query_str, account_id.as_i64()).await
    }

    async fn get_customers_by_company(&self, company_id: AccountId) -> DbResult<Vec<Customer>> {
        let query_str =
            format!("SELECT {} WHERE c.company_id = ? ORDER BY c.account_id", CUSTOMER_COLUMNS);
        self.fetch_all_by_ids(&query_str, &[company_id.as_i64()]).await
    }
}

#[async_trait]
impl CompanyRepository for SqliteStore {
    async fn save_company(&self, account_id: AccountId) -> DbResult<()> {
        let mut conn = self.db.acquire().await?;

        let query_str = "INSERT INTO companies (account_id) VALUES (?)";
        sqlx::query(query_str)
            .bind(account_id.as_i64())
            .execute(&mut *conn)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }

    async fn get_company(&self, account_id: AccountId) -> DbResult<Company> {
        let query_str = format!("SELECT {} WHERE c.account_id = ?", COMPANY_COLUMNS);
        self.fetch_one_by_id(&query_str, account_id.as_i64()).await
    }

    async fn get_companies(&self) -> DbResult<Vec<Company>> {
        let query_str = format!("SELECT {} ORDER BY c.account_id", COMPANY_COLUMNS);
        self.fetch_all_by_ids(&query_str, &[]).await
    }
}

#[async_trait]
impl BusRepository for SqliteStore {
    async fn save_bus(&self, company_id: AccountId, capacity: Capacity) -> DbResult<Bus> {
        let mut conn = self.db.acquire().await?;

        let query_str = "
            INSERT INTO buses (company_id, capacity) VALUES (?, ?)
            RETURNING id, company_id, capacity
        ";
        let row = sqlx::query(query_str)
            .bind(company_id.as_i64())
            .bind(i32::from(capacity.as_u16()))
            .fetch_one(&mut *conn)
            .await
            .map_err(map_sqlx_error)?;
        Bus::try_from(row)
    }

    async fn get_bus(&self, id: BusId) -> DbResult<Bus> {
        let query_str = "SELECT id, company_id, capacity FROM buses WHERE id = ?";
        self.fetch_one_by_id(query_str, id.as_i64()).await
    }

    async fn get_buses(&self) -> DbResult<Vec<Bus>> {
        let query_str = "SELECT id, company_id, capacity FROM buses ORDER BY id";
        self.fetch_all_by_ids(query_str, &[]).await
    }

    async fn update_bus(&self, bus: &Bus) -> DbResult<()> {
        let mut conn = self.db.acquire().await?;

        let query_str = "UPDATE buses SET capacity = ? WHERE id = ?";
        let done = sqlx::query(query_str)
            .bind(i32::from(bus.capacity().as_u16()))
            .bind(bus.id().as_i64())
            .execute(&mut *conn)
            .await
            .map_err(map_sqlx_error)?;
        expect_one_row(done.rows_affected(), "Bus update")
    }

    async fn delete_bus(&self, id: BusId) -> DbResult<()> {
        let mut conn = self.db.acquire().await?;

        let query_str = "DELETE FROM buses WHERE id = ?";
        let done = sqlx::query(query_str)
            .bind(id.as_i64())
            .execute(&mut *conn)
            .await
            .map_err(map_sqlx_error)?;
        expect_one_row(done.rows_affected(), "Bus deletion")
    }
}

#[async_trait]
impl CityRepository for SqliteStore {
    async fn save_city(&self, name: &CityName) -> DbResult<City> {
        let mut conn = self.db.acquire().await?;

        let query_str = "INSERT INTO cities (name) VALUES (?) RETURNING id, name";
        let row = sqlx::query(query_str)
            .bind(name.as_str())
            .fetch_one(&mut *conn)
            .await
            .map_err(map_sqlx_error)?;
        City::try_from(row)
    }

    async fn get_city(&self, id: CityId) -> DbResult<City> {
        let query_str = "SELECT id, name FROM cities WHERE id = ?";
        self.fetch_one_by_id(query_str, id.as_i64()).await
    }

    async fn get_cities(&self) -> DbResult<Vec<City>> {
        let query_str = "SELECT id, name FROM cities ORDER BY name";
        self.fetch_all_by_ids(query_str, &[]).await
    }
}

#[async_trait]
impl TravelRepository for SqliteStore {
    async fn save_travel(&self, info: &TravelInfo) -> DbResult<Travel> {
        let (departure_secs, departure_nsecs) = unpack_timestamp(*info.departure_time())?;
        let (arrival_secs, arrival_nsecs) = unpack_timestamp(*info.arrival_time())?;

        let mut conn = self.db.acquire().await?;

        let query_str = "
            INSERT INTO travels (
                price_cents, account_id, bus_id,
                departure_city_id, departure_time_secs, departure_time_nsecs,
                arrival_city_id, arrival_time_secs, arrival_time_nsecs
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING id
        ";
        let row = sqlx::query(query_str)
            .bind(info.price().as_cents())
            .bind(info.company_id().as_i64())
            .bind(info.bus_id().as_i64())
            .bind(info.departure_city_id().as_i64())
            .bind(departure_secs)
            .bind(departure_nsecs)
            .bind(info.arrival_city_id().as_i64())
            .bind(arrival_secs)
            .bind(arrival_nsecs)
            .fetch_one(&mut *conn)
            .await
            .map_err(map_sqlx_error)?;
        let id: i64 = row.try_get("id").map_err(map_sqlx_error)?;
        Ok(Travel::new(TravelId::new(id), info.clone()))
    }

    async fn get_travel(&self, id: TravelId) -> DbResult<Travel> {
        let query_str = format!("SELECT {} WHERE id = ?", TRAVEL_COLUMNS);
        self.fetch_one_by_id(&query_str, id.as_i64()).await
    }

    async fn get_travels_between(
        &self,
        departure_city_id: CityId,
        arrival_city_id: CityId,
    ) -> DbResult<Vec<Travel>> {
        let query_str = format!(
            "SELECT {} WHERE departure_city_id = ? AND arrival_city_id = ?
            ORDER BY departure_time_secs, departure_time_nsecs, id",
            TRAVEL_COLUMNS
        );
        self.fetch_all_by_ids(&query_str, &[departure_city_id.as_i64(), arrival_city_id.as_i64()])
            .await
    }

    async fn get_travels_departing_from(
        &self,
        city_id: CityId,
        after: OffsetDateTime,
    ) -> DbResult<Vec<Travel>> {
        let (after_secs, after_nsecs) = unpack_timestamp(after)?;

        let query_str = format!(
            "SELECT {} WHERE departure_city_id = ?
                AND (departure_time_secs > ?
                    OR (departure_time_secs = ? AND departure_time_nsecs > ?))
            ORDER BY departure_time_secs, departure_time_nsecs, id",
            TRAVEL_COLUMNS
        );
        self.fetch_all_by_ids(&query_str, &[city_id.as_i64(), after_secs, after_secs, after_nsecs])
            .await
    }
}

#[async_trait]
impl TicketRepository for SqliteStore {
    async fn save_ticket(
        &self,
        account_id: AccountId,
        travel_id: TravelId,
        status: TicketStatus,
    ) -> DbResult<Ticket> {
        let mut conn = self.db.acquire().await?;

        let query_str = "
            INSERT INTO tickets (account_id, travel_id, status) VALUES (?, ?, ?)
            RETURNING id, account_id, travel_id, status
        ";
        let row = sqlx::query(query_str)
            .bind(account_id.as_i64())
            .bind(travel_id.as_i64())
            .bind(status.as_str())
            .fetch_one(&mut *conn)
            .await
            .map_err(map_sqlx_error)?;
        Ticket::try_from(row)
    }

    async fn get_ticket(&self, id: TicketId) -> DbResult<Ticket> {
        let query_str = "SELECT id, account_id, travel_id, status FROM tickets WHERE id = ?";
        self.fetch_one_by_id(query_str, id.as_i64()).await
    }

    async fn get_tickets_by_account(&self, account_id: AccountId) -> DbResult<Vec<Ticket>> {
        let query_str = "
            SELECT id, account_id, travel_id, status FROM tickets
            WHERE account_id = ? ORDER BY id
        ";
        self.fetch_all_by_ids(query_str, &[account_id.as_i64()]).await
    }

    async fn get_tickets_by_company(&self, company_id: AccountId) -> DbResult<Vec<Ticket>> {
        let query_str = "
            SELECT t.id, t.account_id, t.travel_id, t.status
            FROM tickets t JOIN customers c ON c.account_id = t.account_id
            WHERE c.company_id = ? ORDER BY t.id
        ";
        self.fetch_all_by_ids(query_str, &[company_id.as_i64()]).await
    }

    async fn count_active_tickets(&self, travel_id: TravelId) -> DbResult<u64> {
        let mut conn = self.db.acquire().await?;

        let query_str = "
            SELECT COUNT(*) AS count FROM tickets WHERE travel_id = ? AND status <> 'Canceled'
        ";
        let row = sqlx::query(query_str)
            .bind(travel_id.as_i64())
            .fetch_one(&mut *conn)
            .await
            .map_err(map_sqlx_error)?;
        let count: i64 = row.try_get("count").map_err(map_sqlx_error)?;
        u64::try_from(count).map_err(|e| DbError::DataIntegrityError(e.to_string()))
    }

    async fn update_ticket(&self, ticket: &Ticket) -> DbResult<()> {
        let mut conn = self.db.acquire().await?;

        let query_str = "UPDATE tickets SET status = ? WHERE id = ?";
        let done = sqlx::query(query_str)
            .bind(ticket.status().as_str())
            .bind(ticket.id().as_i64())
            .execute(&mut *conn)
            .await
            .map_err(map_sqlx_error)?;
        expect_one_row(done.rows_affected(), "Ticket update")
    }

    async fn delete_ticket(&self, id: TicketId) -> DbResult<()> {
        let mut conn = self.db.acquire().await?;

        let query_str = "DELETE FROM tickets WHERE id = ?";
        let done = sqlx::query(query_str)
            .bind(id.as_i64())
            .execute(&mut *conn)
            .await
            .map_err(map_sqlx_error)?;
        expect_one_row(done.rows_affected(), "Ticket deletion")
    }
}

#[async_trait]
impl Store for SqliteStore {
    async fn migrate(&self) -> DbResult<()> {
        self.db.run_schema(SCHEMA).await
    }

    async fn close(&self) {
        self.db.close().await
    }
}

/// Test utilities for the SQLite store.
pub(crate) mod testutils {
    use super::*;

    /// Creates an in-memory store with the schema already applied.
    pub(crate) async fn setup() -> SqliteStore {
        let store = SqliteStore::from(nuvora_core::db::sqlite::testutils::setup().await);
        store.migrate().await.unwrap();
        store
    }
}

#[cfg(test)]
mod tests {
    use crate::db::tests::generate_db_tests;

    generate_db_tests!(super::testutils::setup().await);
}
