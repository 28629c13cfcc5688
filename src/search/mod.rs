// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query parsing and batch search.
//!
//! ```text
//! query file ──▶ Query::parse ──▶ search_all / search_all_threaded ──▶ ResultMap
//! ```

mod batch;
mod query;

pub use batch::{search_all, search_all_threaded, ResultMap, SearchTask};
pub use query::{parse_queries, read_queries, Query};
