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

//! Business logic for the booking service.

use crate::db::Store;
use crate::model::{AccountId, Caller};
use derivative::Derivative;
use jsonwebtoken::{DecodingKey, EncodingKey};
use nuvora_core::clocks::Clock;
use nuvora_core::db::{DbError, DbResult};
use nuvora_core::driver::{DriverError, DriverResult};
use nuvora_core::env::{get_optional_var, get_required_var};
use std::sync::Arc;
use std::time::Duration;

mod accounts;
mod buses;
mod cities;
mod employees;
#[cfg(test)]
pub(crate) mod testutils;
mod tickets;
mod tokens;
mod travels;

/// Default value for the `EXPIRES_IN` setting when not specified.
const DEFAULT_TOKEN_EXPIRES_IN_SECONDS: u64 = 24 * 60 * 60;

/// Configuration options for the access tokens issued by the driver.
#[derive(Clone, Derivative)]
#[derivative(Debug)]
#[cfg_attr(test, derive(PartialEq))]
pub struct TokenOptions {
    /// Secret used to sign and verify the tokens.
    #[derivative(Debug = "ignore")]
    pub secret: String,

    /// The amount of time we consider tokens valid for.
    pub expires_in: Duration,
}

impl TokenOptions {
    /// Creates a new set of options from environment variables whose name is prefixed with the
    /// given `prefix`.
    ///
    /// This will use variables such as `<prefix>_SECRET` and `<prefix>_EXPIRES_IN`.
    pub fn from_env(prefix: &str) -> Result<Self, String> {
        let secret = get_required_var::<String>(prefix, "SECRET")?;
        if secret.is_empty() {
            return Err(format!("Environment variable {}_SECRET cannot be empty", prefix));
        }
        Ok(Self {
            secret,
            expires_in: get_optional_var::<Duration>(prefix, "EXPIRES_IN")?
                .unwrap_or_else(|| Duration::from_secs(DEFAULT_TOKEN_EXPIRES_IN_SECONDS)),
        })
    }
}

/// Keys derived from the `TokenOptions` to sign and verify tokens.
struct TokenKeys {
    /// Key to sign new tokens with.
    encoding: EncodingKey,

    /// Key to verify the signature of incoming tokens with.
    decoding: DecodingKey,

    /// The amount of time we consider tokens valid for.
    expires_in: Duration,
}

/// Business logic.
///
/// The public operations exposed by the driver are all "one shot": each is a single business
/// action that may issue a few independent database calls.  These operations consume the driver
/// so that callers clone it once per action.
#[derive(Clone)]
pub(crate) struct Driver {
    /// The store that the driver uses for persistence.
    store: Arc<dyn Store>,

    /// Clock instance to obtain the current time.
    clock: Arc<dyn Clock + Send + Sync>,

    /// Keys and settings for the access tokens.
    tokens: Arc<TokenKeys>,
}

impl Driver {
    /// Creates a new driver backed by the given injected components.
    pub(crate) fn new(
        store: Arc<dyn Store>,
        clock: Arc<dyn Clock + Send + Sync>,
        opts: TokenOptions,
    ) -> Self {
        let tokens = TokenKeys {
            encoding: EncodingKey::from_secret(opts.secret.as_bytes()),
            decoding: DecodingKey::from_secret(opts.secret.as_bytes()),
            expires_in: opts.expires_in,
        };
        Self { store, clock, tokens: Arc::from(tokens) }
    }
}

/// Fails with `Forbidden` unless `caller` can operate on resources owned by `account_id`.
fn ensure_may_act_for(caller: &Caller, account_id: AccountId) -> DriverResult<()> {
    if caller.may_act_for(account_id) {
        Ok(())
    } else {
        Err(DriverError::Forbidden(format!("Cannot act on behalf of account {}", account_id)))
    }
}

/// Converts a `DbError::NotFound` in `result` into a `DriverError::NotFound` that names `what`.
fn or_not_found<T>(result: DbResult<T>, what: &str) -> DriverResult<T> {
    match result {
        Ok(value) => Ok(value),
        Err(DbError::NotFound) => Err(DriverError::NotFound(format!("{} not found", what))),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PermissionLevel;

    #[test]
    pub fn test_token_options_from_env_defaults() {
        temp_env::with_vars(
            [("PREFIX_SECRET", Some("the-secret")), ("PREFIX_EXPIRES_IN", None)],
            || {
                let opts = TokenOptions::from_env("PREFIX").unwrap();
                assert_eq!(
                    TokenOptions {
                        secret: "the-secret".to_owned(),
                        expires_in: Duration::from_secs(24 * 3600),
                    },
                    opts
                );
            },
        );
    }

    #[test]
    pub fn test_token_options_from_env_all_present() {
        temp_env::with_vars(
            [("PREFIX_SECRET", Some("the-secret")), ("PREFIX_EXPIRES_IN", Some("30m"))],
            || {
                let opts = TokenOptions::from_env("PREFIX").unwrap();
                assert_eq!(Duration::from_secs(30 * 60), opts.expires_in);
            },
        );
    }

    #[test]
    pub fn test_token_options_from_env_missing_secret() {
        temp_env::with_vars([("PREFIX_SECRET", None::<&str>)], || {
            let err = TokenOptions::from_env("PREFIX").unwrap_err();
            assert!(err.contains("PREFIX_SECRET not present"));
        });
        temp_env::with_vars([("PREFIX_SECRET", Some(""))], || {
            let err = TokenOptions::from_env("PREFIX").unwrap_err();
            assert!(err.contains("cannot be empty"));
        });
    }

    #[test]
    pub fn test_token_options_debug_hides_secret() {
        let opts = TokenOptions {
            secret: "super-secret".to_owned(),
            expires_in: Duration::from_secs(1),
        };
        assert!(!format!("{:?}", opts).contains("super-secret"));
    }

    #[test]
    fn test_ensure_may_act_for() {
        let caller =
            Caller { account_id: AccountId::new(3), permission_level: PermissionLevel::COMPANY };
        ensure_may_act_for(&caller, AccountId::new(3)).unwrap();
        match ensure_may_act_for(&caller, AccountId::new(4)) {
            Err(DriverError::Forbidden(msg)) => assert!(msg.contains("account 4")),
            e => panic!("{:?}", e),
        }
    }

    #[test]
    fn test_or_not_found() {
        assert_eq!(Ok(3), or_not_found(Ok(3), "Thing"));
        assert_eq!(
            Err(DriverError::NotFound("Thing not found".to_owned())),
            or_not_found::<()>(Err(DbError::NotFound), "Thing")
        );
        assert_eq!(
            Err(DriverError::AlreadyExists("Already exists".to_owned())),
            or_not_found::<()>(Err(DbError::AlreadyExists), "Thing")
        );
    }
}
