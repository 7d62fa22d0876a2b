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

//! High-level data types of the service catalog.

mod pagination;
pub use pagination::{PageRequest, Paginated, Pagination};
mod search;
pub use search::SearchTerms;
mod service;
pub use service::{Service, ServiceFields, ServiceId};
mod version;
pub use version::{Version, VersionFields, VersionId, VersionStatus};

use konnect_core::model::{ModelError, ModelResult};

/// Ensures that the user-supplied `value` for `field` is not blank and has at most `max_length`
/// characters.
fn validate_required_text(field: &str, value: &str, max_length: usize) -> ModelResult<()> {
    if value.trim().is_empty() {
        return Err(ModelError(format!("{} cannot be empty", field)));
    }
    if value.chars().count() > max_length {
        return Err(ModelError(format!(
            "{} cannot be longer than {} characters",
            field, max_length
        )));
    }
    Ok(())
}
