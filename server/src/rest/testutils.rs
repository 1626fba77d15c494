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

//! Test utilities for the REST API.

use crate::db::AccountRepository;
use crate::driver::testutils::TestContext as DriverTestContext;
use crate::model::Caller;
use crate::rest::app;
use axum::Router;
use std::ops::Deref;
use std::time::Duration;

/// Maximum duration of the requests served by the test app.
const TEST_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// State of a running test.
///
/// Dereferences to the business layer's test context so that tests can seed data directly.
pub(crate) struct TestContext {
    /// Seeding and inspection helpers for the backing store.
    inner: DriverTestContext,

    /// The router under test.
    app: Router,
}

impl TestContext {
    /// Initializes the REST app on top of an in-memory database.
    pub(crate) async fn setup() -> Self {
        let inner = DriverTestContext::setup().await;
        let app = app(inner.driver(), TEST_REQUEST_TIMEOUT);
        Self { inner, app }
    }

    /// Gets a clone of the app router.
    pub(crate) fn app(&self) -> Router {
        self.app.clone()
    }

    /// Consumes the context and transforms it into the app router.
    pub(crate) fn into_app(self) -> Router {
        self.app
    }

    /// Initializes the REST app and issues a token for an admin, which goes through every gate.
    ///
    /// The token is optional to match what the payload test generators expect.
    pub(crate) async fn setup_as_admin() -> (Router, Option<String>) {
        let context = Self::setup().await;
        let admin = context.create_admin("Root").await;
        let token = context.token(&admin).await;
        (context.into_app(), Some(token))
    }

    /// Issues a valid access token for `caller`, as a login would.
    pub(crate) async fn token(&self, caller: &Caller) -> String {
        let account = self.inner.store().get_account(caller.account_id).await.unwrap();
        self.inner.driver().issue_token(&account).unwrap().as_str().to_owned()
    }
}

impl Deref for TestContext {
    type Target = DriverTestContext;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
