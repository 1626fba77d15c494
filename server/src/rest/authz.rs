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

//! Access control for the protected groups of routes.

use crate::driver::Driver;
use crate::model::PermissionLevel;
use crate::rest::httputils::get_bearer_auth;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use nuvora_core::driver::DriverError;
use nuvora_core::rest::RestError;

/// Authentication realm advertised in `WWW-Authenticate` responses.
pub(crate) const REALM: &str = "nuvora";

/// Configuration of the gate that protects a group of routes.
#[derive(Clone)]
pub(crate) struct Gate {
    /// Driver used to verify access tokens.
    pub(crate) driver: Driver,

    /// Highest permission level that may go through the gate.
    pub(crate) max_level: PermissionLevel,
}

/// Builds the error returned to callers that cannot go through the gate.
fn unauthorized(message: String) -> RestError {
    RestError::Unauthorized { scheme: "Bearer", realm: REALM, message }
}

/// Middleware that requires a valid bearer token whose permission level is within the gate's
/// threshold.
///
/// The verified identity is attached to the request as a `Caller` extension for the handlers.
pub(crate) async fn require(
    State(gate): State<Gate>,
    mut request: Request,
    next: Next,
) -> Result<Response, RestError> {
    let token = get_bearer_auth(request.headers(), REALM)?;

    let caller = match gate.driver.verify_token(&token) {
        Ok(caller) => caller,
        Err(DriverError::Unauthorized(message)) => {
            log::info!("Rejected token: {}", message);
            return Err(unauthorized(message));
        }
        Err(e) => return Err(e.into()),
    };

    if !caller.permission_level.allows(gate.max_level) {
        return Err(unauthorized("Wrong permission level".to_owned()));
    }

    request.extensions_mut().insert(caller);
    Ok(next.run(request).await)
}
