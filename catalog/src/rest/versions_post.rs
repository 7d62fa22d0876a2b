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

//! API to create a new version of a service.

use crate::driver::Driver;
use crate::model::{ServiceId, Version, VersionFields, VersionStatus};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use konnect_core::rest::{JsonBody, RestResult};
use serde::Deserialize;
#[cfg(test)]
use serde::Serialize;

/// Message sent by the client to create a version.
#[derive(Deserialize)]
#[cfg_attr(test, derive(Serialize))]
pub(crate) struct VersionRequest {
    /// Semantic version string.  Not required to be unique.
    semver: String,

    /// Lifecycle status of the version.
    status: VersionStatus,

    /// Optional notes about the changes in this version.
    #[serde(default)]
    changelog: Option<String>,
}

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(service_id): Path<ServiceId>,
    JsonBody(request): JsonBody<VersionRequest>,
) -> RestResult<(StatusCode, Json<Version>)> {
    let fields = VersionFields::new(request.semver, request.status, request.changelog)?;
    let version = driver.create_version(&service_id, fields).await?;
    Ok((StatusCode::CREATED, Json(version)))
}
