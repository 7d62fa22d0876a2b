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

//! Shared building blocks for the Konnect web services.
//!
//! Services built on top of this crate follow a layered architecture and should structure their
//! code with these modules:
//!
//! 1.  `model`: High-level data types that represent concepts in the domain of the application.
//!     Types validate their contents at construction time and return a `ModelError` otherwise.
//!
//! 1.  `db`: The persistence layer.  Services provide free functions that take an `Executor` and
//!     issue the queries for every supported database backend.
//!
//! 1.  `driver`: The business logic layer.  Services provide a `Driver` type that holds the
//!     injected dependencies (database, clock) and coordinates transactions.
//!
//! 1.  `rest`: The HTTP layer.  Services provide an `app` function that returns the
//!     `axum::Router` backed by a `Driver`.
//!
//! 1.  `main`: The launcher.  It gathers configuration from environment variables, opens the
//!     database, and starts serving.
//!
//! Every layer has its own result and error types, such as `DbResult` and `DbError`, and errors
//! convert upwards via `From` so that `?` carries them to the REST layer, where they turn into HTTP
//! status codes.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

pub mod clocks;
pub mod db;
pub mod driver;
pub mod env;
pub mod model;
pub mod rest;
