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

//! Test utilities for the REST API.

use crate::db;
use crate::driver::Driver;
use crate::model::*;
use crate::rest::app;
use axum::Router;
use konnect_core::clocks::testutils::{utc_datetime, MonotonicClock};
use konnect_core::db::{Db, DbError, Executor};
use std::sync::Arc;
use time::{Duration, OffsetDateTime};

/// State of a running test.
pub(crate) struct TestContext {
    /// The database backing the app, for direct manipulation.
    db: Arc<dyn Db + Send + Sync>,

    /// The router under test.
    app: Router,

    /// Fake creation time for the next entity created via this context, in minutes since the
    /// beginning of 2024.
    next_minute: i64,
}

impl TestContext {
    /// Initializes the app using an in-memory database and a monotonic clock.
    pub(crate) async fn setup() -> Self {
        let db: Arc<dyn Db + Send + Sync> =
            Arc::new(konnect_core::db::sqlite::testutils::setup().await);
        db::init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        let clock = Arc::new(MonotonicClock::new(1_800_000_000));
        let driver = Driver::new(db.clone(), clock);
        let app = app(driver);
        Self { db, app, next_minute: 0 }
    }

    /// Gets a copy of the router for the app.
    pub(crate) fn app(&self) -> Router {
        self.app.clone()
    }

    /// Consumes the context and returns the router for the app.
    pub(crate) fn into_app(self) -> Router {
        self.app
    }

    /// Returns a timestamp that is newer than any other previously returned by this function.
    fn next_timestamp(&mut self) -> OffsetDateTime {
        let timestamp = utc_datetime(2024, 1, 1, 0, 0, 0) + Duration::minutes(self.next_minute);
        self.next_minute += 1;
        timestamp
    }

    /// Gets a direct executor against the database.
    async fn ex(&self) -> Executor {
        self.db.ex().await.unwrap()
    }

    /// Creates a service directly in the database.  Every call yields a newer service.
    pub(crate) async fn create_service(
        &mut self,
        name: &str,
        description: Option<&str>,
    ) -> Service {
        let fields = ServiceFields::new(
            name.to_owned(),
            name.to_lowercase().replace(' ', "-"),
            description.map(str::to_owned),
        )
        .unwrap();
        let created_at = self.next_timestamp();
        let service = Service::new(ServiceId::generate(), fields, created_at);
        db::create_service(&mut self.ex().await, &service).await.unwrap();
        service
    }

    /// Creates a version directly in the database without touching the versions count.  Every
    /// call yields a newer version.
    pub(crate) async fn create_version(&mut self, service_id: &ServiceId, semver: &str) -> Version {
        let fields = VersionFields::new(semver.to_owned(), VersionStatus::Released, None).unwrap();
        let created_at = self.next_timestamp();
        let version = Version::new(VersionId::generate(), service_id.clone(), fields, created_at);
        db::create_version(&mut self.ex().await, &version).await.unwrap();
        version
    }

    /// Gets a service from the database, if it exists.
    pub(crate) async fn get_service(&self, id: &ServiceId) -> Option<Service> {
        match db::get_service(&mut self.ex().await, id).await {
            Ok(service) => Some(service),
            Err(DbError::NotFound) => None,
            Err(e) => panic!("Failed to get service: {:?}", e),
        }
    }

    /// Counts the versions of a service stored in the database.
    pub(crate) async fn count_versions(&self, service_id: &ServiceId) -> u64 {
        db::count_versions(&mut self.ex().await, service_id).await.unwrap()
    }
}
