// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Index construction and lookup.
//!
//! Two layers, one shape:
//! - **SearchIndex**: word → document → positions, owned by a single builder
//! - **ConcurrentIndex**: the same index behind a [`SharedLock`](crate::util::SharedLock),
//!   shared by worker-pool build and search tasks

mod concurrent;
mod inverted;
mod positions;

pub use concurrent::ConcurrentIndex;
pub use inverted::SearchIndex;
pub use positions::PositionIndex;

use crate::types::{SearchMode, SearchResult};

/// Anything a query batch can be run against.
pub trait Searchable: Send + Sync {
    fn search_terms(&self, terms: &[String], mode: SearchMode) -> Vec<SearchResult>;
}

impl Searchable for SearchIndex {
    fn search_terms(&self, terms: &[String], mode: SearchMode) -> Vec<SearchResult> {
        self.search(terms, mode)
    }
}

impl Searchable for ConcurrentIndex {
    fn search_terms(&self, terms: &[String], mode: SearchMode) -> Vec<SearchResult> {
        self.search(terms, mode)
    }
}
