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

//! Extends the driver with the methods to issue and verify access tokens.

use crate::driver::Driver;
use crate::model::{AccessToken, Account, AccountId, Caller, PermissionLevel};
use jsonwebtoken::{Algorithm, Header, Validation};
use nuvora_core::driver::{DriverError, DriverResult};
use nuvora_core::model::EmailAddress;
use serde::{Deserialize, Serialize};

/// Claims carried by our access tokens.
#[derive(Debug, Deserialize, Serialize)]
struct TokenClaims {
    /// Account the token was issued to.
    account_id: AccountId,

    /// Email address of the account at issue time.
    email: EmailAddress,

    /// Role tier of the account at issue time.
    permission_level: PermissionLevel,

    /// Issue time, in seconds since the epoch.
    iat: i64,

    /// Expiration time, in seconds since the epoch.
    exp: i64,
}

impl Driver {
    /// Issues a new signed access token for `account`.
    pub(crate) fn issue_token(&self, account: &Account) -> DriverResult<AccessToken> {
        let now = self.clock.now_utc().unix_timestamp();
        let expires_in = i64::try_from(self.tokens.expires_in.as_secs())
            .map_err(|e| DriverError::BackendError(format!("Invalid token lifetime: {}", e)))?;

        let claims = TokenClaims {
            account_id: *account.id(),
            email: account.email().clone(),
            permission_level: *account.permission_level(),
            iat: now,
            exp: now.saturating_add(expires_in),
        };
        let token =
            jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.tokens.encoding)
                .map_err(|e| DriverError::BackendError(format!("Cannot sign token: {}", e)))?;
        Ok(AccessToken::new(token)?)
    }

    /// Verifies the signature and expiration of `token` and returns the identity it carries.
    pub(crate) fn verify_token(&self, token: &AccessToken) -> DriverResult<Caller> {
        // Expiration is checked against our own clock below, not the system time.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;

        let data = jsonwebtoken::decode::<TokenClaims>(
            token.as_str(),
            &self.tokens.decoding,
            &validation,
        )
        .map_err(|e| DriverError::Unauthorized(format!("Invalid token: {}", e)))?;
        let claims = data.claims;

        if claims.exp <= self.clock.now_utc().unix_timestamp() {
            return Err(DriverError::Unauthorized(
                "Token expired; please log in again".to_owned(),
            ));
        }

        Ok(Caller { account_id: claims.account_id, permission_level: claims.permission_level })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::testutils::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_issue_and_verify_ok() {
        let context = TestContext::setup().await;
        let (company, _) = context.create_company("Fast Lines").await;

        let account = context.store().get_account(*company.account_id()).await.unwrap();
        let token = context.driver().issue_token(&account).unwrap();

        let caller = context.driver().verify_token(&token).unwrap();
        assert_eq!(*company.account_id(), caller.account_id);
        assert_eq!(PermissionLevel::COMPANY, caller.permission_level);
    }

    #[tokio::test]
    async fn test_verify_expired() {
        let context = TestContext::setup().await;
        let (company, _) = context.create_company("Fast Lines").await;

        let account = context.store().get_account(*company.account_id()).await.unwrap();
        let token = context.driver().issue_token(&account).unwrap();

        context.clock().advance(Duration::from_secs(TEST_TOKEN_LIFETIME_SECONDS - 1));
        context.driver().verify_token(&token).unwrap();

        context.clock().advance(Duration::from_secs(1));
        match context.driver().verify_token(&token) {
            Err(DriverError::Unauthorized(msg)) => assert!(msg.contains("expired")),
            e => panic!("{:?}", e),
        }
    }

    #[tokio::test]
    async fn test_verify_bad_signature() {
        let context = TestContext::setup().await;
        let (company, _) = context.create_company("Fast Lines").await;

        let account = context.store().get_account(*company.account_id()).await.unwrap();
        let token = context.driver().issue_token(&account).unwrap();

        let other = TestContext::setup_with_secret("a different secret").await;
        match other.driver().verify_token(&token) {
            Err(DriverError::Unauthorized(msg)) => assert!(msg.contains("Invalid token")),
            e => panic!("{:?}", e),
        }
    }

    #[tokio::test]
    async fn test_verify_garbage() {
        let context = TestContext::setup().await;

        let token = AccessToken::new("abc.def.ghi").unwrap();
        match context.driver().verify_token(&token) {
            Err(DriverError::Unauthorized(msg)) => assert!(msg.contains("Invalid token")),
            e => panic!("{:?}", e),
        }
    }
}
