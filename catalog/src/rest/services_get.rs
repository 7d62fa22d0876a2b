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

//! API to list all services.

use crate::driver::Driver;
use crate::model::{Paginated, Service};
use crate::rest::PageQuery;
use axum::extract::State;
use axum::Json;
use konnect_core::rest::{EmptyBody, QueryParams, RestResult};

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    QueryParams(query): QueryParams<PageQuery>,
    _: EmptyBody,
) -> RestResult<Json<Paginated<Service>>> {
    let page = query.into_page_request()?;
    let services = driver.list_services(page).await?;
    Ok(Json(services))
}
