// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.

#![doc(hidden)]

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use url::Url;

use crate::crawl::Fetcher;
use crate::index::SearchIndex;

/// Build an index from `(doc_id, tokens)` pairs.
pub fn index_from(docs: &[(&str, &[&str])]) -> SearchIndex {
    let mut index = SearchIndex::new();
    for (doc_id, words) in docs {
        index.add_all(&words[..], doc_id);
    }
    index
}

/// Write `(relative path, contents)` files under `root`, creating directories.
pub fn write_files(root: &Path, files: &[(&str, &str)]) -> io::Result<Vec<PathBuf>> {
    files
        .iter()
        .map(|(relative, contents)| {
            let path = root.join(relative);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, contents)?;
            Ok(path)
        })
        .collect()
}

/// In-memory [`Fetcher`] that serves canned pages and records every request.
#[derive(Debug, Default)]
pub struct MemoryFetcher {
    pages: HashMap<String, String>,
    requests: Mutex<HashMap<String, usize>>,
    total: AtomicUsize,
}

impl MemoryFetcher {
    pub fn new(pages: &[(&str, &str)]) -> Self {
        Self {
            pages: pages
                .iter()
                .map(|(url, html)| (url.to_string(), html.to_string()))
                .collect(),
            ..Self::default()
        }
    }

    /// Requests made for `url`.
    pub fn hits(&self, url: &str) -> usize {
        self.requests.lock().get(url).copied().unwrap_or(0)
    }

    /// Largest number of requests made for any single URL.
    pub fn max_hits(&self) -> usize {
        self.requests.lock().values().copied().max().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.total.load(Ordering::SeqCst)
    }
}

impl Fetcher for MemoryFetcher {
    fn fetch_html(&self, url: &Url) -> Option<String> {
        self.total.fetch_add(1, Ordering::SeqCst);
        *self.requests.lock().entry(url.to_string()).or_default() += 1;
        self.pages.get(url.as_str()).cloned()
    }
}
