// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! One run end to end: build → write index → search → write results.
//!
//! A run is either serial (plain [`SearchIndex`], no threads) or threaded
//! (a [`TaskQueue`] plus a [`ConcurrentIndex`]); the choice comes from
//! [`Config::workers`]. A web crawl is always threaded.

use std::sync::Arc;

use indicatif::ProgressBar;
use tracing::info;

use crate::build::{build_from_web, build_local, build_local_threaded};
use crate::config::{Config, QuerySource, Source};
use crate::crawl::{FetchConfig, Fetcher, HttpFetcher};
use crate::error::{BuildError, Result};
use crate::index::{ConcurrentIndex, SearchIndex, Searchable};
use crate::output::{write_index, write_results};
use crate::runtime::TaskQueue;
use crate::search::{read_queries, search_all, search_all_threaded, Query, ResultMap};
use crate::types::SearchMode;

/// Counts reported after a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub documents: usize,
    pub words: usize,
    pub queries: usize,
}

pub enum Engine {
    Serial(SearchIndex),
    Threaded {
        queue: TaskQueue,
        index: Arc<ConcurrentIndex>,
    },
}

impl Engine {
    /// A threaded engine with `workers` threads, or a serial one for `None`.
    pub fn new(workers: Option<usize>) -> Result<Self, BuildError> {
        Ok(match workers {
            Some(workers) => Engine::Threaded {
                queue: TaskQueue::new(workers).map_err(BuildError::Spawn)?,
                index: Arc::new(ConcurrentIndex::new()),
            },
            None => Engine::Serial(SearchIndex::new()),
        })
    }

    /// Fill the index from `source`. Returns the number of documents processed.
    pub fn build(
        &mut self,
        source: &Source,
        fetch: FetchConfig,
        progress: &ProgressBar,
    ) -> Result<usize, BuildError> {
        match (self, source) {
            (Engine::Serial(index), Source::Local { path, .. }) => build_local(path, index),
            (Engine::Threaded { queue, index }, Source::Local { path, .. }) => {
                build_local_threaded(path, queue, Arc::clone(index), progress)
            }
            (Engine::Threaded { queue, index }, Source::Web { seed, limit, .. }) => {
                let fetcher = web_fetcher(fetch)?;
                Ok(build_from_web(seed, *limit, queue, Arc::clone(index), fetcher, progress).len())
            }
            (Engine::Serial(index), Source::Web { seed, limit, workers }) => {
                // Crawling always needs a pool; the crawled index is handed back afterwards.
                let queue = TaskQueue::new(*workers).map_err(BuildError::Spawn)?;
                let shared = Arc::new(ConcurrentIndex::from(std::mem::take(index)));
                let fetcher = web_fetcher(fetch)?;
                let visited = build_from_web(seed, *limit, &queue, Arc::clone(&shared), fetcher, progress);
                drop(queue);
                *index = Arc::try_unwrap(shared)
                    .map(ConcurrentIndex::into_inner)
                    .unwrap_or_else(|shared| shared.snapshot());
                Ok(visited.len())
            }
        }
    }

    /// Run every query. Threaded engines run one task per query.
    pub fn search(&self, queries: &[Query], mode: SearchMode) -> ResultMap {
        match self {
            Engine::Serial(index) => search_all(index, queries, mode),
            Engine::Threaded { queue, index } => {
                let index: Arc<dyn Searchable> = Arc::clone(index) as Arc<dyn Searchable>;
                search_all_threaded(queue, index, queries, mode)
            }
        }
    }

    pub fn num_words(&self) -> usize {
        match self {
            Engine::Serial(index) => index.num_words(),
            Engine::Threaded { index, .. } => index.num_words(),
        }
    }

    pub fn num_documents(&self) -> usize {
        match self {
            Engine::Serial(index) => index.documents().len(),
            Engine::Threaded { index, .. } => index.num_documents(),
        }
    }

    /// Serialize the index while holding at most a read guard.
    pub fn write_index(&self, path: &std::path::Path) -> Result<(), crate::error::OutputError> {
        match self {
            Engine::Serial(index) => write_index(path, index),
            Engine::Threaded { index, .. } => write_index(path, &index.read()),
        }
    }

    /// Stop the worker pool, if any. Further searches run nothing.
    pub fn shutdown(&self) {
        if let Engine::Threaded { queue, .. } = self {
            queue.shutdown();
        }
    }
}

fn web_fetcher(config: FetchConfig) -> Result<Arc<dyn Fetcher>, BuildError> {
    Ok(Arc::new(HttpFetcher::new(config)?))
}

/// Execute a validated configuration.
pub fn run(config: &Config, progress: &ProgressBar) -> Result<RunSummary> {
    let mut engine = Engine::new(config.workers())?;
    let documents = engine.build(&config.source, config.fetch, progress)?;
    progress.finish_and_clear();

    if let Some(path) = &config.index_output {
        engine.write_index(path)?;
        info!(path = %path.display(), "index written");
    }

    let queries = match &config.queries {
        Some(QuerySource::File(path)) => read_queries(path)?,
        Some(QuerySource::Line(line)) => Query::parse(line).into_iter().collect(),
        None => Vec::new(),
    };
    let results = engine.search(&queries, config.mode);

    if let Some(path) = &config.results_output {
        write_results(path, &results)?;
        info!(path = %path.display(), "results written");
    }
    engine.shutdown();

    Ok(RunSummary {
        documents,
        words: engine.num_words(),
        queries: results.len(),
    })
}
