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

//! Identifiers of the persisted entities.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Declares a newtype over the `i64` primary keys assigned by the database.
macro_rules! id_type [
    ( $name:ident, $what:literal ) => {
        #[doc = concat!("Identifier of ", $what, ".")]
        #[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
        #[serde(transparent)]
        pub(crate) struct $name(i64);

        impl $name {
            /// Wraps a raw database key.
            pub(crate) fn new(id: i64) -> Self {
                Self(id)
            }

            /// Returns the raw database key.
            pub(crate) fn as_i64(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    }
];

id_type!(AccountId, "an account, which also identifies its customer or company role");
id_type!(BusId, "a bus");
id_type!(CityId, "a city");
id_type!(PersonId, "a person");
id_type!(TicketId, "a ticket");
id_type!(TravelId, "a travel");
