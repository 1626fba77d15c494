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

//! Request logging.

use axum::body::Body;
use axum::extract::{MatchedPath, Request};
use axum::middleware::Next;
use axum::response::Response;
use std::time::Instant;

/// Maximum size of an error body that we are willing to buffer to log it.
const MAX_LOGGED_BODY_SIZE: usize = 64 * 1024;

/// Returns the path of `request` to log: the route template when the router matched one, so that
/// values in the path such as credentials stay out of the logs, or the raw path otherwise.
fn logged_path(request: &Request) -> String {
    match request.extensions().get::<MatchedPath>() {
        Some(matched) => matched.as_str().to_owned(),
        None => request.uri().path().to_owned(),
    }
}

/// Middleware that logs every request with its outcome and latency.
///
/// Server errors also get their message logged.
pub(crate) async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = logged_path(&request);
    let start = Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    let elapsed = start.elapsed();
    if !status.is_server_error() {
        log::info!("{} {} -> {} in {:?}", method, path, status.as_u16(), elapsed);
        return response;
    }

    let (parts, body) = response.into_parts();
    match axum::body::to_bytes(body, MAX_LOGGED_BODY_SIZE).await {
        Ok(bytes) => {
            log::warn!(
                "{} {} -> {} in {:?}: {}",
                method,
                path,
                status.as_u16(),
                elapsed,
                String::from_utf8_lossy(&bytes)
            );
            Response::from_parts(parts, Body::from(bytes))
        }
        Err(e) => {
            log::warn!("{} {} -> {} in {:?}: {}", method, path, status.as_u16(), elapsed, e);
            Response::from_parts(parts, Body::empty())
        }
    }
}
