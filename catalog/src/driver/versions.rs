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

//! Operations on the versions of a service.

use crate::db;
use crate::driver::Driver;
use crate::model::{PageRequest, Paginated, ServiceId, Version, VersionFields, VersionId};
use konnect_core::db::{DbResult, TxExecutor};
use konnect_core::driver::DriverResult;
use log::warn;

/// Stores `version` and bumps the versions count of its service within `tx`.
async fn insert_version(tx: &mut TxExecutor, version: &Version) -> DbResult<()> {
    db::create_version(tx.ex(), version).await?;
    // Zero affected rows is fine here: the service may be gone and the database decides whether
    // the version can exist without it.
    db::increment_versions_count(tx.ex(), version.service_id()).await?;
    Ok(())
}

impl Driver {
    /// Gets one `page` of the versions of the service identified by `service_id`, newest first.
    ///
    /// The service is not required to exist: an unknown service simply has no versions.
    pub(crate) async fn list_versions(
        self,
        service_id: &ServiceId,
        page: PageRequest,
    ) -> DriverResult<Paginated<Version>> {
        let mut tx = self.db.begin().await?;
        let total = db::count_versions(tx.ex(), service_id).await?;
        let versions = db::list_versions(tx.ex(), service_id, &page).await?;
        tx.commit().await?;
        Ok(Paginated::new(versions, &page, total))
    }

    /// Creates a new version with `fields` for the service identified by `service_id`.
    ///
    /// The version and the increment of the service's versions count are committed together or
    /// not at all.
    pub(crate) async fn create_version(
        self,
        service_id: &ServiceId,
        fields: VersionFields,
    ) -> DriverResult<Version> {
        let now = self.clock.now_utc();
        let version = Version::new(VersionId::generate(), service_id.clone(), fields, now);

        let mut tx = self.db.begin().await?;
        if let Err(e) = insert_version(&mut tx, &version).await {
            if let Err(rollback_err) = tx.rollback().await {
                warn!("Failed to roll back version creation for {}: {}", service_id, rollback_err);
            }
            return Err(e.into());
        }
        tx.commit().await?;
        Ok(version)
    }
}
