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

//! The `Version` data type.

use super::validate_required_text;
use super::ServiceId;
use derive_getters::Getters;
use derive_more::{AsRef, Constructor, Display};
use konnect_core::model::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Maximum length of a semantic version string.
const MAX_SEMVER_LENGTH: usize = 64;

/// Opaque identifier of a version.
#[derive(AsRef, Clone, Constructor, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub struct VersionId(String);

impl VersionId {
    /// Generates a new random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

/// Lifecycle stage of a version.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionStatus {
    /// The version is being prepared.
    Draft,

    /// The version is available for use.
    Released,

    /// The version should no longer be used.
    Deprecated,
}

impl VersionStatus {
    /// Returns the textual representation of the status, as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            VersionStatus::Draft => "draft",
            VersionStatus::Released => "released",
            VersionStatus::Deprecated => "deprecated",
        }
    }
}

impl TryFrom<&str> for VersionStatus {
    type Error = ModelError;

    fn try_from(value: &str) -> ModelResult<Self> {
        match value {
            "draft" => Ok(VersionStatus::Draft),
            "released" => Ok(VersionStatus::Released),
            "deprecated" => Ok(VersionStatus::Deprecated),
            _ => Err(ModelError(format!("Unknown version status '{}'", value))),
        }
    }
}

/// The user-supplied properties of a version, already validated.
#[derive(Clone, Debug, PartialEq)]
pub struct VersionFields {
    /// Semantic version string, such as `1.2.3`.  Not checked for semver syntax.
    semver: String,

    /// Lifecycle stage.
    status: VersionStatus,

    /// Optional description of the changes in this version.
    changelog: Option<String>,
}

impl VersionFields {
    /// Validates and creates a new set of version properties.
    pub fn new(
        semver: String,
        status: VersionStatus,
        changelog: Option<String>,
    ) -> ModelResult<Self> {
        validate_required_text("semver", &semver, MAX_SEMVER_LENGTH)?;
        Ok(Self { semver, status, changelog })
    }
}

/// A release record owned by a service.
#[derive(Clone, Debug, Getters, PartialEq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
pub struct Version {
    /// Identifier assigned at creation time.
    id: VersionId,

    /// Identifier of the service that owns this version.
    service_id: ServiceId,

    /// Semantic version string.
    semver: String,

    /// Lifecycle stage.
    status: VersionStatus,

    /// Optional description of the changes in this version.
    changelog: Option<String>,

    /// Time when the version was created.
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
}

impl Version {
    /// Creates a new version for `service_id`.
    pub fn new(
        id: VersionId,
        service_id: ServiceId,
        fields: VersionFields,
        created_at: OffsetDateTime,
    ) -> Self {
        Self {
            id,
            service_id,
            semver: fields.semver,
            status: fields.status,
            changelog: fields.changelog,
            created_at,
        }
    }
}
