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

//! Access tokens and the identity they carry.

use crate::model::{AccountId, PermissionLevel};
use nuvora_core::model::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length of an encoded access token.
const MAX_TOKEN_LENGTH: usize = 4096;

/// An opaque type representing a signed access token.
///
/// Access tokens are JWTs in compact form: three base64url segments separated by dots.
#[derive(Clone, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub(crate) struct AccessToken(String);

impl AccessToken {
    /// Creates a new access token from an untrusted string, checking its shape only.
    pub(crate) fn new<S: Into<String>>(token: S) -> ModelResult<Self> {
        let token = token.into();
        if token.is_empty() || token.len() > MAX_TOKEN_LENGTH {
            return Err(ModelError("Invalid access token".to_owned()));
        }
        if token.split('.').count() != 3 {
            return Err(ModelError("Invalid access token".to_owned()));
        }
        for ch in token.chars() {
            if !(ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' || ch == '.') {
                return Err(ModelError("Invalid access token".to_owned()));
            }
        }
        Ok(Self(token))
    }

    /// Returns the string representation of the token.
    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("scrubbed access token")
    }
}

/// The authenticated identity behind a request, as extracted from a verified access token.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Caller {
    /// Account that issued the request.
    pub(crate) account_id: AccountId,

    /// Role tier of the account at the time the token was issued.
    pub(crate) permission_level: PermissionLevel,
}

impl Caller {
    /// Returns true if the caller can operate on resources owned by `account_id`.  Admins can
    /// act for anyone.
    pub(crate) fn may_act_for(&self, account_id: AccountId) -> bool {
        self.permission_level == PermissionLevel::ADMIN || self.account_id == account_id
    }
}
