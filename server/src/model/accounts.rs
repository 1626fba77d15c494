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

//! People, their accounts and the roles they play.

use crate::model::{AccountId, HashedPassword};
use derive_getters::Getters;
use derive_more::Constructor;
use nuvora_core::model::{EmailAddress, ModelError, ModelResult};
use serde::{Deserialize, Serialize};

/// Maximum length of a person's name per the schema.
const MAX_NAME_LENGTH: usize = 100;

/// Maximum length of an identity document per the schema.
const MAX_DOCUMENT_LENGTH: usize = 32;

/// Role tier of an account.  Lower values are more privileged.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(try_from = "u8", into = "u8")]
pub(crate) struct PermissionLevel(u8);

impl PermissionLevel {
    /// Operators of the service.
    pub(crate) const ADMIN: PermissionLevel = PermissionLevel(0);

    /// Travel companies, which own buses and offer travels.
    pub(crate) const COMPANY: PermissionLevel = PermissionLevel(1);

    /// Customers, which buy tickets.
    pub(crate) const CUSTOMER: PermissionLevel = PermissionLevel(2);

    /// Creates a permission level from its numeric representation.
    pub(crate) fn new(level: u8) -> ModelResult<Self> {
        if level > Self::CUSTOMER.0 {
            return Err(ModelError(format!("Unknown permission level {}", level)));
        }
        Ok(Self(level))
    }

    /// Creates a permission level from the representation used by the database.
    pub(crate) fn from_i16(level: i16) -> ModelResult<Self> {
        match u8::try_from(level) {
            Ok(level) => Self::new(level),
            Err(_) => Err(ModelError(format!("Unknown permission level {}", level))),
        }
    }

    /// Returns the representation used by the database.
    pub(crate) fn as_i16(self) -> i16 {
        i16::from(self.0)
    }

    /// Returns true if this level is at least as privileged as `threshold`.
    pub(crate) fn allows(self, threshold: PermissionLevel) -> bool {
        self.0 <= threshold.0
    }
}

impl TryFrom<u8> for PermissionLevel {
    type Error = ModelError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        PermissionLevel::new(value)
    }
}

impl From<PermissionLevel> for u8 {
    fn from(value: PermissionLevel) -> Self {
        value.0
    }
}

/// Validates that `s` is a non-empty single-line string of at most `max_length` bytes.
fn validate_text(what: &str, s: String, max_length: usize) -> ModelResult<String> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ModelError(format!("{} cannot be empty", what)));
    }
    if s.len() > max_length {
        return Err(ModelError(format!("{} is too long", what)));
    }
    if s.chars().any(char::is_control) {
        return Err(ModelError(format!("{} cannot contain control characters", what)));
    }
    Ok(s.to_owned())
}

/// Full name of a person.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(try_from = "String", into = "String")]
pub(crate) struct PersonName(String);

impl PersonName {
    /// Creates a new name from an untrusted string `s`, making sure it is valid.
    pub(crate) fn new<S: Into<String>>(s: S) -> ModelResult<Self> {
        validate_text("Name", s.into(), MAX_NAME_LENGTH).map(Self)
    }

    /// Returns a string view of the name.
    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PersonName {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        PersonName::new(value)
    }
}

impl From<PersonName> for String {
    fn from(value: PersonName) -> Self {
        value.0
    }
}

/// Identity document of a person (an individual's or a company's tax number).  Documents are
/// unique across all people.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(try_from = "String", into = "String")]
pub(crate) struct Document(String);

impl Document {
    /// Creates a new document from an untrusted string `s`, making sure it is valid.
    pub(crate) fn new<S: Into<String>>(s: S) -> ModelResult<Self> {
        let s = validate_text("Document", s.into(), MAX_DOCUMENT_LENGTH)?;
        if s.contains(char::is_whitespace) {
            return Err(ModelError("Document cannot contain whitespace".to_owned()));
        }
        Ok(Self(s))
    }

    /// Returns a string view of the document.
    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Document {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Document::new(value)
    }
}

impl From<Document> for String {
    fn from(value: Document) -> Self {
        value.0
    }
}

/// A person, who may act as a customer or as a company.
#[derive(Clone, Constructor, Debug, Getters, PartialEq)]
pub(crate) struct Person {
    /// Full name.
    name: PersonName,

    /// Identity document.
    document: Document,
}

/// Credentials and role of a person.
#[derive(Constructor, Debug, Getters)]
pub(crate) struct Account {
    /// Identifier of the account.
    id: AccountId,

    /// Email address used to log in.
    email: EmailAddress,

    /// Hash of the password used to log in.
    password: HashedPassword,

    /// Role tier of the account.
    permission_level: PermissionLevel,

    /// The person that owns this account.
    person: Person,
}

/// A customer, which buys tickets and may be employed by a company.
#[derive(Constructor, Debug, Getters, PartialEq)]
pub(crate) struct Customer {
    /// Account of the customer.
    account_id: AccountId,

    /// Email address of the customer's account.
    email: EmailAddress,

    /// The person behind the customer.
    person: Person,

    /// The company that employs this customer, if any.
    company_id: Option<AccountId>,
}

/// A travel company, which owns buses and offers travels.
#[derive(Constructor, Debug, Getters, PartialEq)]
pub(crate) struct Company {
    /// Account of the company.
    account_id: AccountId,

    /// Email address of the company's account.
    email: EmailAddress,

    /// The person (legal entity) behind the company.
    person: Person,
}
