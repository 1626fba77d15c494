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

//! Entry point to the booking service.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use nuvora_core::db::postgres::PostgresOptions;
use nuvora_core::env::get_optional_var;
use nuvora_server::{TokenOptions, serve};
use std::net::Ipv4Addr;
use std::process;
use std::time::Duration;

/// Port to listen on when `NUVORA_PORT` is not set.
const DEFAULT_PORT: u16 = 8080;

/// Maximum duration of a request when `NUVORA_REQUEST_TIMEOUT` is not set.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings read from the environment at startup.
struct Config {
    /// Port to listen on.
    port: u16,

    /// Maximum duration of a request.
    request_timeout: Duration,

    /// Database connection settings.
    db_opts: PostgresOptions,

    /// Access token settings.
    token_opts: TokenOptions,
}

/// Gathers the configuration of the service from `NUVORA_*` environment variables.
fn load_config() -> Result<Config, String> {
    Ok(Config {
        port: get_optional_var::<u16>("NUVORA", "PORT")?.unwrap_or(DEFAULT_PORT),
        request_timeout: get_optional_var::<Duration>("NUVORA", "REQUEST_TIMEOUT")?
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT),
        db_opts: PostgresOptions::from_env("NUVORA_DB")?,
        token_opts: TokenOptions::from_env("NUVORA_JWT")?,
    })
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            process::exit(1);
        }
    };

    let addr = (Ipv4Addr::UNSPECIFIED, config.port);
    if let Err(e) = serve(addr, config.db_opts, config.token_opts, config.request_timeout).await {
        eprintln!("Server failed: {}", e);
        process::exit(1);
    }
}
