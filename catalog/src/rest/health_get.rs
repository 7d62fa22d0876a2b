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

//! API to check that the server is alive.

use axum::Json;
use konnect_core::rest::{EmptyBody, RestResult};
use serde::Serialize;

/// Message returned by the server when it is alive.
#[derive(Serialize)]
pub(crate) struct HealthResponse {
    /// Always `ok`.
    status: &'static str,
}

/// API handler.
pub(crate) async fn handler(_: EmptyBody) -> RestResult<Json<HealthResponse>> {
    Ok(Json(HealthResponse { status: "ok" }))
}
