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

//! Service catalog REST API.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use konnect_core::clocks::Clock;
use konnect_core::db::Db;
use konnect_core::env::get_optional_var;
use log::info;
use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;

pub mod db;
pub(crate) mod driver;
use driver::Driver;
pub(crate) mod model;
mod rest;
use rest::app;

/// Port to listen on when none is configured.
const DEFAULT_PORT: u16 = 8080;

/// Logging filter to apply when none is configured.
const DEFAULT_LOG_LEVEL: &str = "debug";

/// Configuration for the HTTP server.
#[derive(Debug, PartialEq)]
pub struct ServerOptions {
    /// TCP port to bind to on all interfaces.
    pub port: u16,

    /// Default filter for the logger.  `RUST_LOG` takes precedence when set.
    pub log_level: String,
}

impl ServerOptions {
    /// Initializes a set of options from environment variables whose name is prefixed with the
    /// given `prefix`.
    ///
    /// This will use variables such as `<prefix>_PORT` and `<prefix>_LOG_LEVEL`.
    pub fn from_env(prefix: &str) -> Result<ServerOptions, String> {
        Ok(ServerOptions {
            port: get_optional_var::<u16>(prefix, "PORT")?.unwrap_or(DEFAULT_PORT),
            log_level: get_optional_var::<String>(prefix, "LOG_LEVEL")?
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_owned()),
        })
    }
}

/// Waits for the signal that requests the server to stop.
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl-C; shutting down"),
        Err(e) => info!("Cannot listen for Ctrl-C ({}); shutting down", e),
    }
}

/// Instantiates all resources to serve the application on `bind_addr` until Ctrl-C.
///
/// While it'd be nice to push this responsibility to `main`, doing so would force us to expose many
/// crate-internal types to the public, which in turn would make dead code detection harder.
pub async fn serve(
    bind_addr: impl Into<SocketAddr>,
    db: Arc<dyn Db + Send + Sync>,
    clock: Arc<dyn Clock + Send + Sync>,
) -> Result<(), Box<dyn Error>> {
    let driver = Driver::new(db, clock);
    let app = app(driver);

    let listener = tokio::net::TcpListener::bind(bind_addr.into()).await?;
    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    info!("Server stopped");
    Ok(())
}
