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

//! The `Service` data type.

use super::validate_required_text;
use derive_getters::Getters;
use derive_more::{AsRef, Constructor, Display};
use konnect_core::model::ModelResult;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Maximum length of the name and slug of a service.
const MAX_NAME_LENGTH: usize = 255;

/// Opaque identifier of a service.
#[derive(AsRef, Clone, Constructor, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub struct ServiceId(String);

impl ServiceId {
    /// Generates a new random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

/// The user-editable properties of a service, already validated.
#[derive(Clone, Debug, Getters, PartialEq)]
pub struct ServiceFields {
    /// Human-readable name.  Unique across services.
    name: String,

    /// URL-friendly name.  Unique across services.
    slug: String,

    /// Optional free-form description.
    description: Option<String>,
}

impl ServiceFields {
    /// Validates and creates a new set of service properties.
    pub fn new(name: String, slug: String, description: Option<String>) -> ModelResult<Self> {
        validate_required_text("name", &name, MAX_NAME_LENGTH)?;
        validate_required_text("slug", &slug, MAX_NAME_LENGTH)?;
        Ok(Self { name, slug, description })
    }
}

/// A catalog entry that can be versioned.
#[derive(Clone, Debug, Getters, PartialEq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
pub struct Service {
    /// Identifier assigned at creation time.
    id: ServiceId,

    /// Human-readable name.
    name: String,

    /// URL-friendly name.
    slug: String,

    /// Optional free-form description.
    description: Option<String>,

    /// Time when the service was created.
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,

    /// Time when the service was last modified.
    #[serde(with = "time::serde::rfc3339")]
    updated_at: OffsetDateTime,

    /// Number of versions created for this service.  This is a cached value maintained by the
    /// version creation path only.
    versions_count: u32,
}

impl Service {
    /// Creates a brand new service with no versions.
    pub fn new(id: ServiceId, fields: ServiceFields, created_at: OffsetDateTime) -> Self {
        Self {
            id,
            name: fields.name,
            slug: fields.slug,
            description: fields.description,
            created_at,
            updated_at: created_at,
            versions_count: 0,
        }
    }

    /// Modifies a service to record when it was last updated.
    pub(crate) fn with_updated_at(mut self, updated_at: OffsetDateTime) -> Self {
        self.updated_at = updated_at;
        self
    }

    /// Modifies a service to set its number of versions.
    pub(crate) fn with_versions_count(mut self, versions_count: u32) -> Self {
        self.versions_count = versions_count;
        self
    }
}
