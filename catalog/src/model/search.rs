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

//! Free-text search queries.

use konnect_core::model::{ModelError, ModelResult};

/// Maximum number of distinct terms honored in a single query.  Extra terms are ignored.
const MAX_TERMS: usize = 32;

/// The words to look for in a free-text search.
///
/// Terms are lowercase runs of alphanumeric characters, so they can be embedded in text search
/// expressions and `LIKE` patterns without escaping.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchTerms(Vec<String>);

impl SearchTerms {
    /// Splits the raw query `q` into terms.
    ///
    /// A missing or blank query is an error.  A query that contains no usable words yields an
    /// empty set of terms, which matches nothing.
    pub fn parse(q: Option<&str>) -> ModelResult<Self> {
        let q = q.unwrap_or_default();
        if q.trim().is_empty() {
            return Err(ModelError("search query 'q' is required".to_owned()));
        }

        let mut terms: Vec<String> = vec![];
        for word in q.split(|c: char| !c.is_alphanumeric()) {
            let word: String =
                word.to_lowercase().chars().filter(|c| c.is_alphanumeric()).collect();
            if word.is_empty() {
                continue;
            }
            if !terms.contains(&word) {
                terms.push(word);
                if terms.len() == MAX_TERMS {
                    break;
                }
            }
        }
        Ok(Self(terms))
    }

    /// Returns true if there are no terms to search for.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the terms.
    #[cfg(any(feature = "sqlite", test))]
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Formats the terms as a text search expression that matches any of them.
    #[cfg(feature = "postgres")]
    pub(crate) fn to_any_query(&self) -> String {
        self.0.join(" | ")
    }
}
