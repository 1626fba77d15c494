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

//! Shared scaffolding for the Nuvora services.
//!
//! The booking service is split in the following layers, and this crate provides the pieces that
//! every layer needs regardless of the domain:
//!
//! 1.  `model`: High-level data types that represent concepts in the domain.  Validation happens
//!     at construction time so that the rest of the code can trust the values it receives.
//!
//! 1.  `db`: The persistence layer.  Services define one repository trait per entity and implement
//!     them for every supported database using the connection types offered here.
//!
//! 1.  `driver`: The business logic layer.  Every business action is an operation on the service's
//!     `Driver` type, which composes repository calls.
//!
//! 1.  `rest`: The HTTP layer.  Every API lives in its own file and delegates to the driver.
//!
//! 1.  `main`: The launcher, which gathers configuration from the environment and starts serving.
//!
//! Each layer has its own result and error types, such as `DbResult` and `DbError`, and they
//! convert into each other so that errors float to the REST layer with the `?` operator.  The REST
//! layer is the only one that decides which HTTP status code an error maps to.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

pub mod clocks;
pub mod db;
pub mod driver;
pub mod env;
pub mod model;
pub mod rest;
