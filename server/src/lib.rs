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

//! Bus travel booking service.
//!
//! Companies publish their buses and the travels those buses run between cities, and customers
//! reserve and buy tickets on those travels.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use crate::db::Store;
use crate::db::postgres::PostgresStore;
use log::info;
use nuvora_core::clocks::SystemClock;
use nuvora_core::db::postgres::PostgresOptions;
use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;

pub(crate) mod db;
pub(crate) mod driver;
pub use driver::TokenOptions;
use driver::Driver;
pub(crate) mod model;
mod rest;
use rest::app;

/// Instantiates all resources to serve the application on `bind_addr`.
///
/// While it'd be nice to push this responsibility to `main`, doing so would force us to expose many
/// crate-internal types to the public, which in turn would make dead code detection harder.
pub async fn serve(
    bind_addr: impl Into<SocketAddr>,
    db_opts: PostgresOptions,
    token_opts: TokenOptions,
    request_timeout: Duration,
) -> Result<(), Box<dyn Error>> {
    let store = Arc::from(PostgresStore::connect(db_opts)?);
    store.migrate().await?;

    let driver = Driver::new(store.clone(), Arc::from(SystemClock::default()), token_opts);
    let app = app(driver, request_timeout).layer(CorsLayer::permissive());

    let bind_addr = bind_addr.into();
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!("Listening on {}", bind_addr);
    let result = axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Shutting down");
            }
        })
        .await;

    store.close().await;
    Ok(result?)
}
