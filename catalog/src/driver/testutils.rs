// Konnect
// Copyright 2024 The Konnect Authors
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

//! Test utilities for the business layer.

use crate::db;
use crate::driver::Driver;
use crate::model::{Service, ServiceFields, ServiceId};
use konnect_core::clocks::testutils::MonotonicClock;
use konnect_core::db::{Db, Executor};
use std::sync::Arc;

/// State of a running test.
pub(crate) struct TestContext {
    /// The database backing the driver, for direct inspection.
    db: Arc<dyn Db + Send + Sync>,

    /// The driver under test.
    driver: Driver,
}

impl TestContext {
    /// Initializes the driver using an in-memory database and a monotonic clock.
    pub(crate) async fn setup() -> Self {
        let db: Arc<dyn Db + Send + Sync> =
            Arc::new(konnect_core::db::sqlite::testutils::setup().await);
        db::init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        let clock = Arc::new(MonotonicClock::new(100000));
        let driver = Driver::new(db.clone(), clock);
        Self { db, driver }
    }

    /// Gets a direct executor against the database.
    pub(crate) async fn ex(&self) -> Executor {
        self.db.ex().await.unwrap()
    }

    /// Runs the raw `sql` statements against the database, bypassing the driver.
    pub(crate) async fn run_sql(&self, sql: &str) {
        match &mut self.ex().await {
            Executor::Sqlite(ex) => konnect_core::db::sqlite::run_schema(ex, sql).await.unwrap(),

            #[allow(unused)]
            _ => unreachable!(),
        }
    }

    /// Gets a copy of the driver in this test context.
    pub(crate) fn driver(&self) -> Driver {
        self.driver.clone()
    }

    /// Syntactic sugar to create a service named `name` via the driver.
    pub(crate) async fn create_service(&self, name: &str) -> Service {
        let fields =
            ServiceFields::new(name.to_owned(), name.to_lowercase().replace(' ', "-"), None)
                .unwrap();
        self.driver().create_service(fields).await.unwrap()
    }

    /// Reads the service identified by `id` straight from the database.
    pub(crate) async fn get_service(&self, id: &ServiceId) -> Service {
        db::get_service(&mut self.ex().await, id).await.unwrap()
    }
}
