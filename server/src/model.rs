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

//! Data types for the booking service.

mod accounts;
pub(crate) use accounts::{
    Account, Company, Customer, Document, Person, PermissionLevel, PersonName,
};
mod buses;
pub(crate) use buses::{Bus, Capacity};
mod cities;
pub(crate) use cities::{City, CityName};
mod ids;
pub(crate) use ids::{AccountId, BusId, CityId, PersonId, TicketId, TravelId};
mod passwords;
pub(crate) use passwords::{HashedPassword, Password};
mod tickets;
pub(crate) use tickets::{Ticket, TicketStatus};
mod tokens;
pub(crate) use tokens::{AccessToken, Caller};
mod travels;
pub(crate) use travels::{Price, Travel, TravelInfo};
