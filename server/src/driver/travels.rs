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

//! Extends the driver with the methods to schedule and find travels.

use crate::db::{BusRepository, CityRepository, TravelRepository};
use crate::driver::{Driver, ensure_may_act_for, or_not_found};
use crate::model::{Caller, CityId, Travel, TravelInfo};
use nuvora_core::db::DbError;
use nuvora_core::driver::{DriverError, DriverResult};

impl Driver {
    /// Schedules a new travel described by `info` for the company in it.
    ///
    /// The bus must belong to the company offering the travel and both cities must exist.
    pub(crate) async fn create_travel(
        self,
        caller: Caller,
        info: TravelInfo,
    ) -> DriverResult<Travel> {
        ensure_may_act_for(&caller, *info.company_id())?;

        match self.store.get_bus(*info.bus_id()).await {
            Ok(bus) if bus.company_id() == info.company_id() => (),
            Ok(_) => {
                return Err(DriverError::InvalidInput(format!(
                    "Bus {} does not belong to company {}",
                    info.bus_id(),
                    info.company_id()
                )));
            }
            Err(DbError::NotFound) => {
                return Err(DriverError::InvalidInput(format!(
                    "Bus {} does not exist",
                    info.bus_id()
                )));
            }
            Err(e) => return Err(e.into()),
        }

        for city_id in [info.departure_city_id(), info.arrival_city_id()] {
            match self.store.get_city(*city_id).await {
                Ok(_) => (),
                Err(DbError::NotFound) => {
                    return Err(DriverError::InvalidInput(format!(
                        "City {} does not exist",
                        city_id
                    )));
                }
                Err(e) => return Err(e.into()),
            }
        }

        Ok(self.store.save_travel(&info).await?)
    }

    /// Finds the travels going from `departure_city_id` to `arrival_city_id`.
    pub(crate) async fn search_travels(
        self,
        departure_city_id: CityId,
        arrival_city_id: CityId,
    ) -> DriverResult<Vec<Travel>> {
        Ok(self.store.get_travels_between(departure_city_id, arrival_city_id).await?)
    }

    /// Finds the travels leaving from `city_id` that have not departed yet.
    pub(crate) async fn get_available_travels(self, city_id: CityId) -> DriverResult<Vec<Travel>> {
        or_not_found(self.store.get_city(city_id).await, "City")?;
        let now = self.clock.now_utc();
        Ok(self.store.get_travels_departing_from(city_id, now).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::testutils::*;
    use crate::model::{Bus, City, CityName, Price};
    use time::OffsetDateTime;
    use time::macros::datetime;

    /// Builds the details of a two-hour travel on `bus` from `from` to `to` at `departure`.
    fn travel_info(bus: &Bus, from: &City, to: &City, departure: OffsetDateTime) -> TravelInfo {
        TravelInfo::new(
            Price::new(1200).unwrap(),
            *bus.company_id(),
            *bus.id(),
            *from.id(),
            departure,
            *to.id(),
            departure + time::Duration::hours(2),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_travel_ok() {
        let context = TestContext::setup().await;
        let (company, caller) = context.create_company("Fast Lines").await;
        let bus = context.create_bus(*company.account_id(), 10).await;
        let a = context.create_city("A").await;
        let b = context.create_city("B").await;

        let info = travel_info(&bus, &a, &b, datetime!(2024-02-01 10:00:00 UTC));
        let travel = context.driver().create_travel(caller, info.clone()).await.unwrap();
        assert_eq!(&info, travel.info());
        assert_eq!(travel, context.store().get_travel(*travel.id()).await.unwrap());
    }

    #[tokio::test]
    async fn test_create_travel_other_company() {
        let context = TestContext::setup().await;
        let (company, _) = context.create_company("Fast Lines").await;
        let (_, other) = context.create_company("Slow Lines").await;
        let bus = context.create_bus(*company.account_id(), 10).await;
        let a = context.create_city("A").await;
        let b = context.create_city("B").await;

        let info = travel_info(&bus, &a, &b, datetime!(2024-02-01 10:00:00 UTC));
        match context.driver().create_travel(other, info).await {
            Err(DriverError::Forbidden(_)) => (),
            e => panic!("{:?}", e),
        }
    }

    #[tokio::test]
    async fn test_create_travel_bus_of_other_company() {
        let context = TestContext::setup().await;
        let (company, caller) = context.create_company("Fast Lines").await;
        let (other, _) = context.create_company("Slow Lines").await;
        let bus = context.create_bus(*other.account_id(), 10).await;
        let a = context.create_city("A").await;
        let b = context.create_city("B").await;

        let departure = datetime!(2024-02-01 10:00:00 UTC);
        let info = TravelInfo::new(
            Price::new(1200).unwrap(),
            *company.account_id(),
            *bus.id(),
            *a.id(),
            departure,
            *b.id(),
            departure + time::Duration::hours(1),
        )
        .unwrap();
        match context.driver().create_travel(caller, info).await {
            Err(DriverError::InvalidInput(msg)) => assert!(msg.contains("does not belong")),
            e => panic!("{:?}", e),
        }
    }

    #[tokio::test]
    async fn test_create_travel_unknown_city() {
        let context = TestContext::setup().await;
        let (company, caller) = context.create_company("Fast Lines").await;
        let bus = context.create_bus(*company.account_id(), 10).await;
        let a = context.create_city("A").await;
        let ghost = City::new(CityId::new(999), CityName::new("Ghost").unwrap());

        let info = travel_info(&bus, &a, &ghost, datetime!(2024-02-01 10:00:00 UTC));
        match context.driver().create_travel(caller, info).await {
            Err(DriverError::InvalidInput(msg)) => assert_eq!("City 999 does not exist", msg),
            e => panic!("{:?}", e),
        }
        let travels = context.store().get_travels_between(*a.id(), CityId::new(999)).await.unwrap();
        assert!(travels.is_empty());
    }

    #[tokio::test]
    async fn test_search_travels() {
        let context = TestContext::setup().await;
        let (company, _) = context.create_company("Fast Lines").await;
        let bus = context.create_bus(*company.account_id(), 10).await;
        let a = context.create_city("A").await;
        let b = context.create_city("B").await;
        let c = context.create_city("C").await;

        let late = context.create_travel(&bus, &a, &b, datetime!(2024-02-02 10:00:00 UTC)).await;
        let early = context.create_travel(&bus, &a, &b, datetime!(2024-02-01 10:00:00 UTC)).await;
        context.create_travel(&bus, &a, &c, datetime!(2024-02-01 10:00:00 UTC)).await;
        context.create_travel(&bus, &b, &a, datetime!(2024-02-01 10:00:00 UTC)).await;

        let travels = context.driver().search_travels(*a.id(), *b.id()).await.unwrap();
        assert_eq!(vec![early, late], travels);

        let travels = context.driver().search_travels(*c.id(), *b.id()).await.unwrap();
        assert!(travels.is_empty());
    }

    #[tokio::test]
    async fn test_get_available_travels() {
        let context = TestContext::setup().await;
        let (company, _) = context.create_company("Fast Lines").await;
        let bus = context.create_bus(*company.account_id(), 10).await;
        let a = context.create_city("A").await;
        let b = context.create_city("B").await;
        let c = context.create_city("C").await;

        context.create_travel(&bus, &a, &b, TEST_NOW - time::Duration::hours(1)).await;
        let soon = context.create_travel(&bus, &a, &b, TEST_NOW + time::Duration::hours(1)).await;
        let later = context.create_travel(&bus, &a, &c, TEST_NOW + time::Duration::days(1)).await;
        context.create_travel(&bus, &b, &a, TEST_NOW + time::Duration::hours(1)).await;

        let travels = context.driver().get_available_travels(*a.id()).await.unwrap();
        assert_eq!(vec![soon, later.clone()], travels);

        context.clock().advance(std::time::Duration::from_secs(2 * 60 * 60));
        let travels = context.driver().get_available_travels(*a.id()).await.unwrap();
        assert_eq!(vec![later], travels);
    }

    #[tokio::test]
    async fn test_get_available_travels_unknown_city() {
        let context = TestContext::setup().await;

        match context.driver().get_available_travels(CityId::new(5)).await {
            Err(DriverError::NotFound(msg)) => assert_eq!("City not found", msg),
            e => panic!("{:?}", e),
        }
    }
}
