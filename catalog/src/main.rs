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

//! Entry point to the service catalog.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use env_logger::Env;
use konnect_catalog::db::init_schema;
use konnect_catalog::{serve, ServerOptions};
use konnect_core::clocks::SystemClock;
use konnect_core::db::postgres::{PostgresDb, PostgresOptions};
use konnect_core::db::Db;
use log::info;
use std::error::Error;
use std::net::Ipv4Addr;
use std::sync::Arc;

/// Opens the database, prepares its schema, and serves the API on `port` until interrupted.
///
/// The database is always closed before returning, even on failure.
async fn run(port: u16, db_opts: PostgresOptions) -> Result<(), Box<dyn Error>> {
    let db: Arc<dyn Db + Send + Sync> = Arc::new(PostgresDb::connect(db_opts)?);

    let result = async {
        init_schema(&mut db.ex().await?).await?;
        info!("Database schema ready");
        serve((Ipv4Addr::UNSPECIFIED, port), db.clone(), Arc::new(SystemClock::default())).await
    }
    .await;

    db.close().await;
    info!("Database closed");
    result
}

#[tokio::main]
async fn main() {
    let server_opts = match ServerOptions::from_env("KONNECT") {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("Invalid server configuration: {}", e);
            std::process::exit(1);
        }
    };
    let env = Env::default().default_filter_or(server_opts.log_level.as_str());
    env_logger::Builder::from_env(env).init();

    let db_opts = match PostgresOptions::from_env("KONNECT_DB") {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("Invalid database configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(server_opts.port, db_opts).await {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
