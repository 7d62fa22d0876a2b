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

//! API to delete a service and all of its versions.

use crate::driver::Driver;
use crate::model::ServiceId;
use axum::extract::{Path, State};
use axum::Json;
use konnect_core::rest::{EmptyBody, RestResult};
use serde::Serialize;
#[cfg(test)]
use serde::Deserialize;

/// Message returned by the server after deleting a service.
#[derive(Serialize)]
#[cfg_attr(test, derive(Deserialize))]
pub(crate) struct DeleteResponse {
    /// Human-readable confirmation.
    message: String,
}

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(id): Path<ServiceId>,
    _: EmptyBody,
) -> RestResult<Json<DeleteResponse>> {
    driver.delete_service(&id).await?;
    Ok(Json(DeleteResponse { message: "Service deleted".to_owned() }))
}
