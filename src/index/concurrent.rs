// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Thread-safe [`SearchIndex`] for the worker-pool pipelines.
//!
//! Every mutation runs under one write guard and every search under one read
//! guard. A document's whole token stream lands in a single write span, so a
//! concurrent search sees all of a document or none of it.

use super::inverted::SearchIndex;
use crate::types::{Position, SearchMode, SearchResult};
use crate::util::{Holders, SharedLock, SharedReadGuard};

#[derive(Debug, Default)]
pub struct ConcurrentIndex {
    inner: SharedLock<SearchIndex>,
}

impl ConcurrentIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, word: &str, doc_id: &str, position: Position) -> bool {
        self.inner.write().add(word, doc_id, position)
    }

    /// Add a document's tokens at positions 1, 2, 3, … under one exclusive hold.
    pub fn add_all<S: AsRef<str>>(&self, words: &[S], doc_id: &str) -> usize {
        self.inner.write().add_all(words, doc_id)
    }

    pub fn add_all_from<S: AsRef<str>>(&self, words: &[S], doc_id: &str, start: Position) -> usize {
        self.inner.write().add_all_from(words, doc_id, start)
    }

    /// Ranked search against one consistent snapshot.
    pub fn search<S: AsRef<str>>(&self, terms: &[S], mode: SearchMode) -> Vec<SearchResult> {
        self.inner.read().search(terms, mode)
    }

    pub fn exact_search<S: AsRef<str>>(&self, terms: &[S]) -> Vec<SearchResult> {
        self.inner.read().exact_search(terms)
    }

    pub fn partial_search<S: AsRef<str>>(&self, terms: &[S]) -> Vec<SearchResult> {
        self.inner.read().partial_search(terms)
    }

    pub fn count(&self, word: &str, doc_id: &str) -> usize {
        self.inner.read().count(word, doc_id)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.inner.read().contains(word)
    }

    pub fn num_words(&self) -> usize {
        self.inner.read().num_words()
    }

    pub fn num_documents(&self) -> usize {
        self.inner.read().documents().len()
    }

    /// Hold a read guard for as long as the caller needs, e.g. while serializing.
    pub fn read(&self) -> SharedReadGuard<'_, SearchIndex> {
        self.inner.read()
    }

    /// Current lock holders.
    pub fn holders(&self) -> Holders {
        self.inner.holders()
    }

    /// Copy of the current contents.
    pub fn snapshot(&self) -> SearchIndex {
        self.inner.read().clone()
    }

    pub fn into_inner(self) -> SearchIndex {
        self.inner.into_inner()
    }
}

impl From<SearchIndex> for ConcurrentIndex {
    fn from(index: SearchIndex) -> Self {
        Self {
            inner: SharedLock::new(index),
        }
    }
}
