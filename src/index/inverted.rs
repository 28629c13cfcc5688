// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Word → [`PositionIndex`] map and the ranked search over it.
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **WORD_PRESENT_IFF_ADDED**: a word is a key iff `add` saw it at least once.
//! 2. **WORDS_SORTED**: words enumerate in lexicographic order, so serialized
//!    output does not depend on insertion order.
//! 3. **NON_EMPTY**: every word's [`PositionIndex`] holds at least one document.
//!
//! # Search
//!
//! Both modes walk matching words in ascending order and fold each
//! document's count and first position into one [`SearchResult`] per
//! document. Each indexed word contributes at most once per query, even when
//! several query terms match it ("ca" and "cat" both match "cat").

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::ops::Bound;

use serde::Serialize;

use super::positions::PositionIndex;
use crate::scoring::ranking::rank;
use crate::types::{Position, SearchMode, SearchResult};

/// Serializes as `{ "<word>": { "<docId>": [pos, ...] }, ... }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SearchIndex {
    words: BTreeMap<String, PositionIndex>,
}

impl SearchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `word` at `position` in `doc_id`. Returns `false` if already recorded.
    pub fn add(&mut self, word: &str, doc_id: &str, position: Position) -> bool {
        match self.words.get_mut(word) {
            Some(positions) => positions.add(doc_id, position),
            None => {
                let mut positions = PositionIndex::new();
                positions.add(doc_id, position);
                self.words.insert(word.to_string(), positions);
                true
            }
        }
    }

    /// Add `words` at positions 1, 2, 3, … in `doc_id`.
    pub fn add_all<S: AsRef<str>>(&mut self, words: &[S], doc_id: &str) -> usize {
        self.add_all_from(words, doc_id, 1)
    }

    /// Add `words` at positions `start`, `start + 1`, … in `doc_id`.
    ///
    /// Returns the number of positions that were new.
    pub fn add_all_from<S: AsRef<str>>(&mut self, words: &[S], doc_id: &str, start: Position) -> usize {
        let mut added = 0;
        for (offset, word) in words.iter().enumerate() {
            if self.add(word.as_ref(), doc_id, start + offset) {
                added += 1;
            }
        }
        added
    }

    /// Number of distinct positions of `word` in `doc_id`.
    pub fn count(&self, word: &str, doc_id: &str) -> usize {
        self.words.get(word).map_or(0, |positions| positions.count(doc_id))
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains_key(word)
    }

    pub fn contains_doc(&self, word: &str, doc_id: &str) -> bool {
        self.words
            .get(word)
            .is_some_and(|positions| positions.contains(doc_id))
    }

    pub fn get(&self, word: &str) -> Option<&PositionIndex> {
        self.words.get(word)
    }

    /// Indexed words in lexicographic order.
    pub fn words(&self) -> impl Iterator<Item = &str> + '_ {
        self.words.keys().map(String::as_str)
    }

    /// `(word, positions)` pairs in lexicographic word order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PositionIndex)> + '_ {
        self.words.iter().map(|(word, positions)| (word.as_str(), positions))
    }

    pub fn num_words(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Every document id appearing under any word, sorted.
    pub fn documents(&self) -> BTreeSet<&str> {
        self.words.values().flat_map(PositionIndex::docs).collect()
    }

    /// Ranked results for `terms` under `mode`.
    pub fn search<S: AsRef<str>>(&self, terms: &[S], mode: SearchMode) -> Vec<SearchResult> {
        match mode {
            SearchMode::Exact => self.exact_search(terms),
            SearchMode::Partial => self.partial_search(terms),
        }
    }

    /// Documents containing a word equal to one of `terms`.
    pub fn exact_search<S: AsRef<str>>(&self, terms: &[S]) -> Vec<SearchResult> {
        let matched: BTreeSet<&str> = terms
            .iter()
            .filter_map(|term| self.words.get_key_value(term.as_ref()))
            .map(|(word, _)| word.as_str())
            .collect();
        self.collect_results(matched)
    }

    /// Documents containing a word that starts with one of `terms`.
    pub fn partial_search<S: AsRef<str>>(&self, terms: &[S]) -> Vec<SearchResult> {
        let mut matched = BTreeSet::new();
        for term in terms {
            let term = term.as_ref();
            // Words sharing a prefix are contiguous in a BTreeMap, starting at the prefix itself.
            let range = self
                .words
                .range::<str, _>((Bound::Included(term), Bound::Unbounded))
                .map(|(word, _)| word.as_str())
                .take_while(|word| SearchMode::Partial.matches(term, word));
            matched.extend(range);
        }
        self.collect_results(matched)
    }

    fn collect_results(&self, matched: BTreeSet<&str>) -> Vec<SearchResult> {
        let mut per_doc: HashMap<&str, SearchResult> = HashMap::new();
        for word in matched {
            let Some(positions) = self.words.get(word) else {
                continue;
            };
            for (doc_id, count, first) in positions.summaries() {
                per_doc
                    .entry(doc_id)
                    .and_modify(|result| result.absorb(count, first))
                    .or_insert_with(|| SearchResult::new(doc_id, count, first));
            }
        }

        let mut results: Vec<SearchResult> = per_doc.into_values().collect();
        rank(&mut results);
        results
    }
}
