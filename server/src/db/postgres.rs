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

//! Implementation of the database abstraction using PostgreSQL.

use crate::db::{
    AccountRepository, BusRepository, CityRepository, CompanyRepository, CustomerRepository,
    PersonRepository, Store, TicketRepository, TravelRepository, expect_one_row,
};
use crate::model::*;
use async_trait::async_trait;
use futures::TryStreamExt;
use nuvora_core::db::postgres::{PostgresDb, PostgresOptions, map_sqlx_error};
use nuvora_core::db::{DbError, DbResult};
use nuvora_core::model::EmailAddress;
use sqlx::Row;
use sqlx::postgres::PgRow;
use time::OffsetDateTime;

/// Schema to use to initialize the database.
const SCHEMA: &str = include_str!("postgres.sql");

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
    departure_city_id, departure_time, arrival_city_id, arrival_time
    FROM travels
";

/// Extracts the `name` and `document` columns of `row` into a `Person`.
fn person_from_row(row: &PgRow) -> DbResult<Person> {
    let name: String = row.try_get("name").map_err(map_sqlx_error)?;
    let document: String = row.try_get("document").map_err(map_sqlx_error)?;
    Ok(Person::new(PersonName::new(name)?, Document::new(document)?))
}

impl TryFrom<PgRow> for Account {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
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

impl TryFrom<PgRow> for Customer {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
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

impl TryFrom<PgRow> for Company {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let account_id: i64 = row.try_get("account_id").map_err(map_sqlx_error)?;
        let email: String = row.try_get("email").map_err(map_sqlx_error)?;

        Ok(Company::new(
            AccountId::new(account_id),
            EmailAddress::new(email)?,
            person_from_row(&row)?,
        ))
    }
}

impl TryFrom<PgRow> for Bus {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(map_sqlx_error)?;
        let company_id: i64 = row.try_get("company_id").map_err(map_sqlx_error)?;
        let capacity: i32 = row.try_get("capacity").map_err(map_sqlx_error)?;

        Ok(Bus::new(BusId::new(id), AccountId::new(company_id), Capacity::from_i32(capacity)?))
    }
}

impl TryFrom<PgRow> for City {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(map_sqlx_error)?;
        let name: String = row.try_get("name").map_err(map_sqlx_error)?;

        Ok(City::new(CityId::new(id), CityName::new(name)?))
    }
}

impl TryFrom<PgRow> for Travel {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(map_sqlx_error)?;
        let price_cents: i64 = row.try_get("price_cents").map_err(map_sqlx_error)?;
        let account_id: i64 = row.try_get("account_id").map_err(map_sqlx_error)?;
        let bus_id: i64 = row.try_get("bus_id").map_err(map_sqlx_error)?;
        let departure_city_id: i64 = row.try_get("departure_city_id").map_err(map_sqlx_error)?;
        let departure_time: OffsetDateTime =
            row.try_get("departure_time").map_err(map_sqlx_error)?;
        let arrival_city_id: i64 = row.try_get("arrival_city_id").map_err(map_sqlx_error)?;
        let arrival_time: OffsetDateTime = row.try_get("arrival_time").map_err(map_sqlx_error)?;

        let info = TravelInfo::new(
            Price::new(price_cents)?,
            AccountId::new(account_id),
            BusId::new(bus_id),
            CityId::new(departure_city_id),
            departure_time,
            CityId::new(arrival_city_id),
            arrival_time,
        )?;
        Ok(Travel::new(TravelId::new(id), info))
    }
}

impl TryFrom<PgRow> for Ticket {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
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

/// Store backed by a PostgreSQL database.
pub(crate) struct PostgresStore {
    /// Connection pool to the database.
    db: PostgresDb,
}

impl From<PostgresDb> for PostgresStore {
    fn from(db: PostgresDb) -> Self {
        Self { db }
    }
}

impl PostgresStore {
    /// Creates a new store that lazily connects to the database described by `opts`.
    pub(crate) fn connect(opts: PostgresOptions) -> DbResult<Self> {
        Ok(Self { db: PostgresDb::connect(opts)? })
    }

    /// Runs `query_str` with a single `id` argument and decodes all returned rows as `T`.
    async fn fetch_all_by_id<T>(&self, query_str: &str, id: Option<i64>) -> DbResult<Vec<T>>
    where
        T: TryFrom<PgRow, Error = DbError>,
    {
        let mut conn = self.db.acquire().await?;
        let mut query = sqlx::query(query_str);
        if let Some(id) = id {
            query = query.bind(id);
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
        T: TryFrom<PgRow, Error = DbError>,
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
impl PersonRepository for PostgresStore {
    async fn save_person(&self, person: &Person) -> DbResult<PersonId> {
        let mut conn = self.db.acquire().await?;

        let query_str = "INSERT INTO persons (name, document) VALUES ($1, $2) RETURNING id";
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

        let query_str = "SELECT name, document FROM persons WHERE id = $1";
        let row = sqlx::query(query_str)
            .bind(id.as_i64())
            .fetch_one(&mut *conn)
            .await
            .map_err(map_sqlx_error)?;
        person_from_row(&row)
    }
}

#[async_trait]
impl AccountRepository for PostgresStore {
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
            VALUES ($1, $2, $3, $4)
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
        let query_str = format!("SELECT {} WHERE a.id = $1", ACCOUNT_COLUMNS);
        self.fetch_one_by_id(&query_str, id.as_i64()).await
    }

    async fn get_account_by_email(&self, email: &EmailAddress) -> DbResult<Account> {
        let mut conn = self.db.acquire().await?;

        let query_str = format!("SELECT {} WHERE a.email = $1", ACCOUNT_COLUMNS);
        let row = sqlx::query(&query_str)
            .bind(email.as_str())
            .fetch_one(&mut *conn)
            .await
            .map_err(map_sqlx_error)?;
        Account::try_from(row)
    }
}

#[async_trait]
impl CustomerRepository for PostgresStore {
    async fn save_customer(
        &self,
        account_id: AccountId,
        company_id: Option<AccountId>,
    ) -> DbResult<()> {
        let mut conn = self.db.acquire().await?;

        let query_str = "INSERT INTO customers (account_id, company_id) VALUES ($1, $2)";
        sqlx::query(query_str)
            .bind(account_id.as_i64())
            .bind(company_id.map(AccountId::as_i64))
            .execute(&mut *conn)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }

    async fn get_customer(&self, account_id: AccountId) -> DbResult<Customer> {
        let query_str = format!("SELECT {} WHERE c.account_id = $1", CUSTOMER_COLUMNS);
        self.fetch_one_by_id(&query_str, account_id.as_i64()).await
    }

    async fn get_customers_by_company(&self, company_id: AccountId) -> DbResult<Vec<Customer>> {
        let query_str =
            format!("SELECT {} WHERE c.company_id = $1 ORDER BY c.account_id", CUSTOMER_COLUMNS);
        self.fetch_all_by_id(&query_str, Some(company_id.as_i64())).await
    }
}

#[async_trait]
impl CompanyRepository for PostgresStore {
    async fn save_company(&self, account_id: AccountId) -> DbResult<()> {
        let mut conn = self.db.acquire().await?;

        let query_str = "INSERT INTO companies (account_id) VALUES ($1)";
        sqlx::query(query_str)
            .bind(account_id.as_i64())
            .execute(&mut *conn)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }

    async fn get_company(&self, account_id: AccountId) -> DbResult<Company> {
        let query_str = format!("SELECT {} WHERE c.account_id = $1", COMPANY_COLUMNS);
        self.fetch_one_by_id(&query_str, account_id.as_i64()).await
    }

    async fn get_companies(&self) -> DbResult<Vec<Company>> {
        let query_str = format!("SELECT {} ORDER BY c.account_id", COMPANY_COLUMNS);
        self.fetch_all_by_id(&query_str, None).await
    }
}

#[async_trait]
impl BusRepository for PostgresStore {
    async fn save_bus(&self, company_id: AccountId, capacity: Capacity) -> DbResult<Bus> {
        let mut conn = self.db.acquire().await?;

        let query_str = "
            INSERT INTO buses (company_id, capacity) VALUES ($1, $2)
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
        let query_str = "SELECT id, company_id, capacity FROM buses WHERE id = $1";
        self.fetch_one_by_id(query_str, id.as_i64()).await
    }

    async fn get_buses(&self) -> DbResult<Vec<Bus>> {
        let query_str = "SELECT id, company_id, capacity FROM buses ORDER BY id";
        self.fetch_all_by_id(query_str, None).await
    }

    async fn update_bus(&self, bus: &Bus) -> DbResult<()> {
        let mut conn = self.db.acquire().await?;

        let query_str = "UPDATE buses SET capacity = $1 WHERE id = $2";
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

        let query_str = "DELETE FROM buses WHERE id = $1";
        let done = sqlx::query(query_str)
            .bind(id.as_i64())
            .execute(&mut *conn)
            .await
            .map_err(map_sqlx_error)?;
        expect_one_row(done.rows_affected(), "Bus deletion")
    }
}

#[async_trait]
impl CityRepository for PostgresStore {
    async fn save_city(&self, name: &CityName) -> DbResult<City> {
        let mut conn = self.db.acquire().await?;

        let query_str = "INSERT INTO cities (name) VALUES ($1) RETURNING id, name";
        let row = sqlx::query(query_str)
            .bind(name.as_str())
            .fetch_one(&mut *conn)
            .await
            .map_err(map_sqlx_error)?;
        City::try_from(row)
    }

    async fn get_city(&self, id: CityId) -> DbResult<City> {
        let query_str = "SELECT id, name FROM cities WHERE id = $1";
        self.fetch_one_by_id(query_str, id.as_i64()).await
    }

    async fn get_cities(&self) -> DbResult<Vec<City>> {
        let query_str = "SELECT id, name FROM cities ORDER BY name";
        self.fetch_all_by_id(query_str, None).await
    }
}

#[async_trait]
impl TravelRepository for PostgresStore {
    async fn save_travel(&self, info: &TravelInfo) -> DbResult<Travel> {
        let mut conn = self.db.acquire().await?;

        let query_str = "
            INSERT INTO travels (
                price_cents, account_id, bus_id,
                departure_city_id, departure_time, arrival_city_id, arrival_time
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
        ";
        let row = sqlx::query(query_str)
            .bind(info.price().as_cents())
            .bind(info.company_id().as_i64())
            .bind(info.bus_id().as_i64())
            .bind(info.departure_city_id().as_i64())
            .bind(*info.departure_time())
            .bind(info.arrival_city_id().as_i64())
            .bind(*info.arrival_time())
            .fetch_one(&mut *conn)
            .await
            .map_err(map_sqlx_error)?;
        let id: i64 = row.try_get("id").map_err(map_sqlx_error)?;
        Ok(Travel::new(TravelId::new(id), info.clone()))
    }

    async fn get_travel(&self, id: TravelId) -> DbResult<Travel> {
        let query_str = format!("SELECT {} WHERE id = $1", TRAVEL_COLUMNS);
        self.fetch_one_by_id(&query_str, id.as_i64()).await
    }

    async fn get_travels_between(
        &self,
        departure_city_id: CityId,
        arrival_city_id: CityId,
    ) -> DbResult<Vec<Travel>> {
        let mut conn = self.db.acquire().await?;

        let query_str = format!(
            "SELECT {} WHERE departure_city_id = $1 AND arrival_city_id = $2
            ORDER BY departure_time, id",
            TRAVEL_COLUMNS
        );
        let mut rows = sqlx::query(&query_str)
            .bind(departure_city_id.as_i64())
            .bind(arrival_city_id.as_i64())
            .fetch(&mut *conn);

        let mut travels = vec![];
        while let Some(row) = rows.try_next().await.map_err(map_sqlx_error)? {
            travels.push(Travel::try_from(row)?);
        }
        Ok(travels)
    }

    async fn get_travels_departing_from(
        &self,
        city_id: CityId,
        after: OffsetDateTime,
    ) -> DbResult<Vec<Travel>> {
        let mut conn = self.db.acquire().await?;

        let query_str = format!(
            "SELECT {} WHERE departure_city_id = $1 AND departure_time > $2
            ORDER BY departure_time, id",
            TRAVEL_COLUMNS
        );
        let mut rows =
            sqlx::query(&query_str).bind(city_id.as_i64()).bind(after).fetch(&mut *conn);

        let mut travels = vec![];
        while let Some(row) = rows.try_next().await.map_err(map_sqlx_error)? {
            travels.push(Travel::try_from(row)?);
        }
        Ok(travels)
    }
}

#[async_trait]
impl TicketRepository for PostgresStore {
    async fn save_ticket(
        &self,
        account_id: AccountId,
        travel_id: TravelId,
        status: TicketStatus,
    ) -> DbResult<Ticket> {
        let mut conn = self.db.acquire().await?;

        let query_str = "
            INSERT INTO tickets (account_id, travel_id, status) VALUES ($1, $2, $3)
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
        let query_str = "SELECT id, account_id, travel_id, status FROM tickets WHERE id = $1";
        self.fetch_one_by_id(query_str, id.as_i64()).await
    }

    async fn get_tickets_by_account(&self, account_id: AccountId) -> DbResult<Vec<Ticket>> {
        let query_str = "
            SELECT id, account_id, travel_id, status FROM tickets
            WHERE account_id = $1 ORDER BY id
        ";
        self.fetch_all_by_id(query_str, Some(account_id.as_i64())).await
    }

    async fn get_tickets_by_company(&self, company_id: AccountId) -> DbResult<Vec<Ticket>> {
        let query_str = "
            SELECT t.id, t.account_id, t.travel_id, t.status
            FROM tickets t JOIN customers c ON c.account_id = t.account_id
            WHERE c.company_id = $1 ORDER BY t.id
        ";
        self.fetch_all_by_id(query_str, Some(company_id.as_i64())).await
    }

    async fn count_active_tickets(&self, travel_id: TravelId) -> DbResult<u64> {
        let mut conn = self.db.acquire().await?;

        let query_str = "
            SELECT COUNT(*) AS count FROM tickets WHERE travel_id = $1 AND status <> 'Canceled'
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

        let query_str = "UPDATE tickets SET status = $1 WHERE id = $2";
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

        let query_str = "DELETE FROM tickets WHERE id = $1";
        let done = sqlx::query(query_str)
            .bind(id.as_i64())
            .execute(&mut *conn)
            .await
            .map_err(map_sqlx_error)?;
        expect_one_row(done.rows_affected(), "Ticket deletion")
    }
}

#[async_trait]
impl Store for PostgresStore {
    async fn migrate(&self) -> DbResult<()> {
        self.db.run_schema(SCHEMA).await
    }

    async fn close(&self) {
        self.db.close().await
    }
}
