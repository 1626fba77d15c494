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

//! Tickets bought by the customers.

use crate::model::{AccountId, TicketId, TravelId};
use derive_getters::Getters;
use derive_more::Constructor;
use nuvora_core::model::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};

/// Payment state of a ticket.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub(crate) enum TicketStatus {
    /// The ticket has been reserved but not paid for yet.  This is the initial state.
    NotPaid,

    /// The ticket has been paid for.
    Paid,

    /// The ticket has been canceled and its seat released.
    Canceled,
}

impl TicketStatus {
    /// Returns the representation used by the database.
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            TicketStatus::NotPaid => "NotPaid",
            TicketStatus::Paid => "Paid",
            TicketStatus::Canceled => "Canceled",
        }
    }

    /// Parses the representation used by the database.
    pub(crate) fn parse(s: &str) -> ModelResult<Self> {
        match s {
            "NotPaid" => Ok(TicketStatus::NotPaid),
            "Paid" => Ok(TicketStatus::Paid),
            "Canceled" => Ok(TicketStatus::Canceled),
            s => Err(ModelError(format!("Unknown ticket status {}", s))),
        }
    }

    /// Checks if a ticket in this state can move to `next`.  Only unpaid tickets can change.
    pub(crate) fn can_become(self, next: TicketStatus) -> bool {
        self == TicketStatus::NotPaid && next != TicketStatus::NotPaid
    }
}

/// A ticket for a travel.
#[derive(Clone, Constructor, Debug, Getters, PartialEq)]
pub(crate) struct Ticket {
    /// Identifier of the ticket.
    id: TicketId,

    /// Account that owns the ticket.
    account_id: AccountId,

    /// Travel the ticket is for.
    travel_id: TravelId,

    /// Payment state of the ticket.
    status: TicketStatus,
}

impl Ticket {
    /// Returns a copy of this ticket in a different `status`.
    pub(crate) fn with_status(self, status: TicketStatus) -> Self {
        Self { status, ..self }
    }
}
