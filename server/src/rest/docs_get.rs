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

//! API to browse the description of the REST interface.

use axum::extract::Path;
use axum::http::header;
use axum::response::{Html, IntoResponse, Response};
use nuvora_core::rest::{EmptyBody, RestError};

/// OpenAPI description of the service.
const OPENAPI: &str = include_str!("openapi.json");

/// Landing page for the documentation.
const INDEX: &str = "<!DOCTYPE html>
<html>
<head><title>Nuvora API</title></head>
<body>
<h1>Nuvora API</h1>
<p>The service is described in <a href=\"/docs/openapi.json\">openapi.json</a>.</p>
</body>
</html>
";

/// GET handler for the documentation index.
pub(crate) async fn index_handler(_: EmptyBody) -> Html<&'static str> {
    Html(INDEX)
}

/// GET handler for every document under the documentation root.
pub(crate) async fn handler(
    Path(path): Path<String>,
    _: EmptyBody,
) -> Result<Response, RestError> {
    match path.as_str() {
        "" | "index.html" => Ok(Html(INDEX).into_response()),
        "openapi.json" => {
            Ok(([(header::CONTENT_TYPE, "application/json")], OPENAPI).into_response())
        }
        _ => Err(RestError::NotFound(format!("Document {} not found", path))),
    }
}
