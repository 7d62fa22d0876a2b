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

//! Offset-based pagination.

use konnect_core::model::{ModelError, ModelResult};
#[cfg(test)]
use serde::Deserialize;
use serde::Serialize;

/// Page number used when the client does not provide a usable one.
const DEFAULT_PAGE: u32 = 1;

/// Page size used when the client does not provide a usable one.
const DEFAULT_PAGE_SIZE: u32 = 10;

/// Largest page size a client may request.
const MAX_PAGE_SIZE: u32 = 100;

/// Parses a raw pagination parameter.  Values that are not integers are treated as absent.
fn parse_param(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
}

/// A request for a specific page of results.
///
/// Both fields are guaranteed to be positive and `page_size` never exceeds `MAX_PAGE_SIZE`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageRequest {
    /// 1-based index of the requested page.
    page: u32,

    /// Maximum number of items in the page.
    page_size: u32,
}

impl PageRequest {
    /// Builds a page request from the raw `page` and `page_size` parameters, falling back to the
    /// defaults for any parameter that is absent, not an integer, or not positive.  This never
    /// fails.
    pub fn extract(page: Option<&str>, page_size: Option<&str>) -> Self {
        let page = parse_param(page)
            .filter(|n| *n >= 1)
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(DEFAULT_PAGE);
        let page_size = parse_param(page_size)
            .filter(|n| *n >= 1)
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(DEFAULT_PAGE_SIZE);
        Self { page, page_size }
    }

    /// Builds a page request like `extract` does but rejects integers that the client supplied
    /// explicitly and that are out of range.
    pub fn validate(page: Option<&str>, page_size: Option<&str>) -> ModelResult<Self> {
        if let Some(n) = parse_param(page) {
            if n < 1 {
                return Err(ModelError("page must be greater than 0".to_owned()));
            }
            if u32::try_from(n).is_err() {
                return Err(ModelError("page is too large".to_owned()));
            }
        }
        if let Some(n) = parse_param(page_size) {
            if n < 1 || n > i64::from(MAX_PAGE_SIZE) {
                return Err(ModelError(format!(
                    "page_size must be between 1 and {}",
                    MAX_PAGE_SIZE
                )));
            }
        }
        Ok(Self::extract(page, page_size))
    }

    /// Creates a page request from already-valid values.
    #[cfg(test)]
    pub(crate) fn new(page: u32, page_size: u32) -> Self {
        assert!(page >= 1);
        assert!((1..=MAX_PAGE_SIZE).contains(&page_size));
        Self { page, page_size }
    }

    /// Returns the number of items to skip to reach this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.page_size)
    }

    /// Returns the maximum number of items to fetch for this page.
    pub fn limit(&self) -> u64 {
        u64::from(self.page_size)
    }
}

/// Metadata describing a page of results within the full result set.
#[derive(Debug, PartialEq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
pub struct Pagination {
    /// 1-based index of this page.
    pub page: u32,

    /// Requested maximum number of items per page.
    pub page_size: u32,

    /// Total number of items across all pages.
    pub total: u64,

    /// Number of pages needed to hold `total` items.
    pub total_pages: u64,

    /// Whether there is a page after this one.
    pub has_next: bool,

    /// Whether there is a page before this one.
    pub has_prev: bool,
}

impl Pagination {
    /// Computes the metadata for `page` out of a result set with `total` items.
    pub fn calculate(page: &PageRequest, total: u64) -> Self {
        let total_pages = total.div_ceil(u64::from(page.page_size));
        Self {
            page: page.page,
            page_size: page.page_size,
            total,
            total_pages,
            has_next: u64::from(page.page) < total_pages,
            has_prev: page.page > 1,
        }
    }
}

/// A page of results together with its pagination metadata.
#[derive(Debug, PartialEq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
pub struct Paginated<T> {
    /// Items in this page.
    pub data: Vec<T>,

    /// Position of this page within the full result set.
    pub pagination: Pagination,
}

impl<T> Paginated<T> {
    /// Wraps the `data` fetched for `page` given that the full result set has `total` items.
    pub fn new(data: Vec<T>, page: &PageRequest, total: u64) -> Self {
        Self { data, pagination: Pagination::calculate(page, total) }
    }
}
