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

//! Entry point to the REST server.
//!
//! Routes are split in groups by the highest permission level that may reach them.  The public
//! group needs no credentials and every other group sits behind an authorization gate.

use crate::driver::Driver;
use crate::model::PermissionLevel;
use axum::Router;
use axum::middleware;
use std::time::Duration;
use tower_http::timeout::TimeoutLayer;

mod authz;
use authz::Gate;
mod bus_delete;
mod bus_get;
mod bus_patch;
mod bus_post;
mod buses_get;
mod cities_get;
mod city_post;
mod companies_get;
mod company_credentials_get;
mod company_employees_get;
mod company_employees_post;
mod company_employees_tickets_get;
mod company_post;
mod company_signup_post;
mod customer_credentials_get;
mod customer_post;
mod customer_signup_post;
mod customer_tickets_get;
mod customer_tickets_post;
mod docs_get;
mod httputils;
mod logging;
#[cfg(test)]
mod testutils;
mod ticket_delete;
mod ticket_get;
mod ticket_patch;
mod ticket_post;
mod travel_company_travels_post;
mod travels_available_get;
mod travels_get;

/// Wraps all routes in `router` with a gate that lets through callers up to `max_level`.
fn gated(router: Router<Driver>, driver: &Driver, max_level: PermissionLevel) -> Router<Driver> {
    let gate = Gate { driver: driver.clone(), max_level };
    router.route_layer(middleware::from_fn_with_state(gate, authz::require))
}

/// Bounds every route in `router` to `request_timeout` and logs all requests, including the ones
/// that time out.
fn with_request_layers(router: Router, request_timeout: Duration) -> Router {
    router
        .layer(TimeoutLayer::new(request_timeout))
        .layer(middleware::from_fn(logging::log_request))
}

/// Creates the router for the application.
///
/// Credentials can be given in the path of the `GET` login routes.  These share their shape with
/// the `tickets` and `employees` routes, which take precedence because passwords must contain
/// digits.
pub(crate) fn app(driver: Driver, request_timeout: Duration) -> Router {
    use axum::routing::{get, patch, post};

    let public = Router::new()
        .route("/customer", post(customer_post::handler))
        .route("/customer/signup", post(customer_signup_post::handler))
        .route("/customer/:id/:password", get(customer_credentials_get::handler))
        .route("/company", get(companies_get::handler).post(company_post::handler))
        .route("/company/:id/:password", get(company_credentials_get::handler))
        .route("/travel", get(travels_get::handler))
        .route("/travel/avaiables/:id", get(travels_available_get::handler))
        .route("/bus", get(buses_get::handler))
        .route("/bus/:id", get(bus_get::handler))
        .route("/city", get(cities_get::handler))
        .route("/docs", get(docs_get::index_handler))
        .route("/docs/*path", get(docs_get::handler));

    let customers = Router::new()
        .route("/customer/:id/tickets", get(customer_tickets_get::handler))
        .route("/customer/:id/tickets/:travel_id", post(customer_tickets_post::handler))
        .route("/ticket", post(ticket_post::handler))
        .route(
            "/ticket/:id",
            get(ticket_get::handler).patch(ticket_patch::handler).delete(ticket_delete::handler),
        );

    let companies = Router::new()
        .route(
            "/company/:id/employees",
            get(company_employees_get::handler).post(company_employees_post::handler),
        )
        .route("/company/:id/employees/tickets", get(company_employees_tickets_get::handler))
        .route("/travel-company/:id/travels", post(travel_company_travels_post::handler))
        .route("/bus", post(bus_post::handler))
        .route("/bus/:id", patch(bus_patch::handler).delete(bus_delete::handler))
        .route("/city/:name", post(city_post::handler));

    let admins = Router::new().route("/company/signup", post(company_signup_post::handler));

    let router = Router::new()
        .merge(public)
        .merge(gated(customers, &driver, PermissionLevel::CUSTOMER))
        .merge(gated(companies, &driver, PermissionLevel::COMPANY))
        .merge(gated(admins, &driver, PermissionLevel::ADMIN))
        .with_state(driver);
    with_request_layers(router, request_timeout)
}
