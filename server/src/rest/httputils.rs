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

//! Utilities to deal with HTTP authorization.

use crate::model::AccessToken;
use axum::http::HeaderMap;
use nuvora_core::rest::{RestError, RestResult, get_unique_header};

/// Builds an `Unauthorized` error for `scheme` in `realm`.
fn unauthorized<S: Into<String>>(
    scheme: &'static str,
    realm: &'static str,
    message: S,
) -> RestError {
    RestError::Unauthorized { scheme, realm, message: message.into() }
}

/// Validates that the `Authorization` HTTP header contains a textual payload for the
/// `exp_scheme` scheme and returns it.
fn get_authorization_header<'a>(
    headers: &'a HeaderMap,
    exp_scheme: &'static str,
    exp_realm: &'static str,
) -> RestResult<&'a str> {
    let authz = match get_unique_header(headers, "Authorization") {
        Ok(Some(value)) => value,
        Ok(None) => {
            return Err(unauthorized(exp_scheme, exp_realm, "Missing Authorization header"));
        }
        Err(e) => return Err(unauthorized(exp_scheme, exp_realm, e.to_string())),
    };

    let authz = authz.to_str().map_err(|e| {
        unauthorized(exp_scheme, exp_realm, format!("Bad encoding in Authorization header: {}", e))
    })?;

    let (scheme, payload) = match authz.split_once(' ') {
        Some((scheme, payload)) if !scheme.is_empty() => (scheme, payload),
        Some(_) => {
            return Err(unauthorized(
                exp_scheme,
                exp_realm,
                "Bad Authorization header: missing scheme",
            ));
        }
        None if authz.is_empty() => {
            return Err(unauthorized(
                exp_scheme,
                exp_realm,
                "Bad Authorization header: missing scheme",
            ));
        }
        None => {
            return Err(unauthorized(
                exp_scheme,
                exp_realm,
                "Bad Authorization header: missing payload",
            ));
        }
    };

    if scheme != exp_scheme {
        return Err(unauthorized(exp_scheme, exp_realm, "Unsupported scheme"));
    }

    Ok(payload)
}

/// Assumes that the `headers` contain a bearer access token and extracts it.
pub(crate) fn get_bearer_auth(
    headers: &HeaderMap,
    exp_realm: &'static str,
) -> RestResult<AccessToken> {
    let payload = get_authorization_header(headers, "Bearer", exp_realm)?;
    AccessToken::new(payload).map_err(|e| unauthorized("Bearer", exp_realm, e.to_string()))
}
