// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query batches, serial or on the worker pool.
//!
//! Both paths produce the same label-ordered map; duplicate queries collapse
//! into one entry.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info};

use super::query::Query;
use crate::index::Searchable;
use crate::runtime::TaskQueue;
use crate::types::{SearchMode, SearchResult};

/// Query label → ranked results.
pub type ResultMap = BTreeMap<String, Vec<SearchResult>>;

/// Run every query against `index` on the calling thread.
pub fn search_all<I>(index: &I, queries: &[Query], mode: SearchMode) -> ResultMap
where
    I: Searchable + ?Sized,
{
    let results: ResultMap = queries
        .iter()
        .map(|query| (query.label(), index.search_terms(query.terms(), mode)))
        .collect();
    info!(queries = results.len(), %mode, "searches finished");
    results
}

/// One query to run on the pool; it writes its results into the shared map.
pub struct SearchTask {
    query: Query,
    mode: SearchMode,
    index: Arc<dyn Searchable>,
    results: Arc<Mutex<ResultMap>>,
}

impl SearchTask {
    pub fn run(self) {
        let found = self.index.search_terms(self.query.terms(), self.mode);
        debug!(query = %self.query, hits = found.len(), "searched");
        self.results.lock().insert(self.query.label(), found);
    }
}

/// Run every query as its own task and wait for all of them.
pub fn search_all_threaded(
    queue: &TaskQueue,
    index: Arc<dyn Searchable>,
    queries: &[Query],
    mode: SearchMode,
) -> ResultMap {
    let results = Arc::new(Mutex::new(ResultMap::new()));
    for query in queries {
        let task = SearchTask {
            query: query.clone(),
            mode,
            index: Arc::clone(&index),
            results: Arc::clone(&results),
        };
        queue.submit(move || task.run());
    }
    queue.await_idle();

    let results = std::mem::take(&mut *results.lock());
    info!(queries = results.len(), %mode, workers = queue.size(), "searches finished");
    results
}
