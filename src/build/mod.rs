// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Index build pipelines.
//!
//! Three ways to fill an index:
//! - **Serial**: walk local files and add them one by one to a plain [`SearchIndex`]
//! - **Threaded**: one [`BuildTask`] per local file on the [`TaskQueue`],
//!   writing into a shared [`ConcurrentIndex`]
//! - **Web**: crawl from a seed URL; every frontier page becomes a build task
//!
//! A file that cannot be read is logged and skipped; the rest of the build goes on.

pub mod documents;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};
use url::Url;

use crate::crawl::{self, Fetcher};
use crate::error::BuildError;
use crate::index::{ConcurrentIndex, SearchIndex};
use crate::runtime::TaskQueue;
use crate::util::tokenize;

pub use documents::{find_html_files, is_html_file};

/// Progress style for the build bars.
pub fn progress_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.cyan} {prefix:<10} [{bar:40.cyan/dim}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("━━╸")
}

/// Read and tokenize one local document.
pub fn read_document(path: &Path) -> Result<Vec<String>, BuildError> {
    let bytes = fs::read(path).map_err(|source| BuildError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(tokenize(&String::from_utf8_lossy(&bytes)))
}

/// Document id of a local file.
pub fn doc_id(path: &Path) -> String {
    path.display().to_string()
}

/// Index a single file. Returns the number of positions added.
pub fn build_file(path: &Path, index: &mut SearchIndex) -> Result<usize, BuildError> {
    let words = read_document(path)?;
    Ok(index.add_all(&words, &doc_id(path)))
}

/// Index every HTML file under `root`, one after another.
///
/// Returns the number of documents indexed.
pub fn build_local(root: &Path, index: &mut SearchIndex) -> Result<usize, BuildError> {
    let files = find_html_files(root)?;
    let mut built = 0;
    for path in &files {
        match build_file(path, index) {
            Ok(words) => {
                debug!(path = %path.display(), words, "indexed");
                built += 1;
            }
            Err(e) => warn!(error = %e, "skipping document"),
        }
    }
    info!(documents = built, words = index.num_words(), "serial build finished");
    Ok(built)
}

/// One local file to index into a shared index.
pub struct BuildTask {
    path: PathBuf,
    index: Arc<ConcurrentIndex>,
    progress: ProgressBar,
}

impl BuildTask {
    pub fn new(path: PathBuf, index: Arc<ConcurrentIndex>, progress: ProgressBar) -> Self {
        Self { path, index, progress }
    }

    /// Tokenize outside the lock, then add the whole document under one write hold.
    pub fn run(self) {
        match read_document(&self.path) {
            Ok(words) => {
                let added = self.index.add_all(&words, &doc_id(&self.path));
                debug!(path = %self.path.display(), words = added, "indexed");
            }
            Err(e) => warn!(error = %e, "skipping document"),
        }
        self.progress.inc(1);
    }
}

/// Index every HTML file under `root` on the worker pool.
///
/// Returns the number of files submitted once all of them have been processed.
pub fn build_local_threaded(
    root: &Path,
    queue: &TaskQueue,
    index: Arc<ConcurrentIndex>,
    progress: &ProgressBar,
) -> Result<usize, BuildError> {
    let files = find_html_files(root)?;
    progress.set_length(files.len() as u64);

    let submitted = files.len();
    for path in files {
        let task = BuildTask::new(path, Arc::clone(&index), progress.clone());
        queue.submit(move || task.run());
    }
    queue.await_idle();

    info!(
        documents = submitted,
        words = index.num_words(),
        workers = queue.size(),
        "threaded build finished"
    );
    Ok(submitted)
}

/// Crawl from `seed`, indexing up to `limit` pages. Returns the crawled URLs.
pub fn build_from_web(
    seed: &Url,
    limit: usize,
    queue: &TaskQueue,
    index: Arc<ConcurrentIndex>,
    fetcher: Arc<dyn Fetcher>,
    progress: &ProgressBar,
) -> Vec<String> {
    progress.set_length(limit as u64);
    let visited = crawl::crawl(seed, limit, queue, Arc::clone(&index), fetcher, progress);
    info!(
        pages = visited.len(),
        words = index.num_words(),
        "web build finished"
    );
    visited
}
