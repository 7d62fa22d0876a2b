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

//! Entry point to the REST server.

use crate::driver::Driver;
use crate::model::{PageRequest, ServiceFields};
use axum::Router;
use konnect_core::rest::RestResult;
use serde::Deserialize;
#[cfg(test)]
use serde::Serialize;

mod health_get;
mod service_delete;
mod service_get;
mod service_put;
mod services_get;
mod services_post;
mod services_search_get;
#[cfg(test)]
mod testutils;
mod versions_get;
mod versions_post;

/// Raw pagination parameters as received in the query string.
///
/// These are kept as strings so that malformed values can be treated as absent instead of causing
/// the whole request to be rejected.
#[derive(Deserialize)]
pub(crate) struct PageQuery {
    /// Requested page number.
    page: Option<String>,

    /// Requested number of items per page.
    page_size: Option<String>,
}

impl PageQuery {
    /// Validates the raw parameters and converts them into a page request.
    pub(crate) fn into_page_request(self) -> RestResult<PageRequest> {
        Ok(PageRequest::validate(self.page.as_deref(), self.page_size.as_deref())?)
    }
}

/// Message sent by the client to create or replace a service.
#[derive(Deserialize)]
#[cfg_attr(test, derive(Serialize))]
pub(crate) struct ServiceRequest {
    /// Human-readable name of the service.
    name: String,

    /// URL-friendly name of the service.
    slug: String,

    /// Optional description of the service.
    #[serde(default)]
    description: Option<String>,
}

impl ServiceRequest {
    /// Validates the request and converts it into service properties.
    pub(crate) fn into_fields(self) -> RestResult<ServiceFields> {
        Ok(ServiceFields::new(self.name, self.slug, self.description)?)
    }
}

/// Creates the router for the application.
pub(crate) fn app(driver: Driver) -> Router {
    use axum::routing::get;
    Router::new()
        .route("/health", get(health_get::handler))
        .route("/api/v1/services", get(services_get::handler).post(services_post::handler))
        .route("/api/v1/services/search", get(services_search_get::handler))
        .route(
            "/api/v1/services/:id",
            get(service_get::handler).put(service_put::handler).delete(service_delete::handler),
        )
        .route(
            "/api/v1/services/:id/versions",
            get(versions_get::handler).post(versions_post::handler),
        )
        .with_state(driver)
}
