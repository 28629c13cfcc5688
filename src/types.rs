// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks shared by the index, the ranker and the writers.
//!
//! # Invariants
//!
//! - **Position**: 1-based. The first token of a document sits at position 1.
//! - **SearchResult**: `frequency >= 1` and `first_position >= 1` for every
//!   result produced by a search; a document with no matched positions never
//!   gets a result.

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

use crate::scoring::ranking::compare_results;

/// 1-based offset of a token within its document's token stream.
pub type Position = usize;

/// How query terms are matched against indexed words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SearchMode {
    /// The indexed word equals a query term.
    Exact,
    /// A query term is a prefix of the indexed word ("ca" matches "cat").
    #[default]
    Partial,
}

impl SearchMode {
    /// `Exact` when `exact` is set, `Partial` otherwise.
    pub fn from_exact_flag(exact: bool) -> Self {
        if exact {
            SearchMode::Exact
        } else {
            SearchMode::Partial
        }
    }

    /// Whether `word` matches `term` under this mode.
    #[inline]
    pub fn matches(self, term: &str, word: &str) -> bool {
        match self {
            SearchMode::Exact => word == term,
            SearchMode::Partial => word.starts_with(term),
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchMode::Exact => f.write_str("exact"),
            SearchMode::Partial => f.write_str("partial"),
        }
    }
}

/// One ranked hit: a document and how strongly it matched a query.
///
/// Serializes to the `{"where", "count", "index"}` shape consumed by the
/// results writer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SearchResult {
    /// Document identifier (file path or URL).
    #[serde(rename = "where")]
    pub doc_id: String,
    /// Total matched positions across every matching word.
    #[serde(rename = "count")]
    pub frequency: usize,
    /// Earliest matched position across every matching word.
    #[serde(rename = "index")]
    pub first_position: Position,
}

impl SearchResult {
    pub fn new(doc_id: impl Into<String>, frequency: usize, first_position: Position) -> Self {
        Self {
            doc_id: doc_id.into(),
            frequency,
            first_position,
        }
    }

    /// Fold another matched word's positions for this document into the totals.
    pub fn absorb(&mut self, count: usize, first_position: Position) {
        self.frequency += count;
        self.first_position = self.first_position.min(first_position);
    }
}

impl PartialOrd for SearchResult {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SearchResult {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_results(self, other)
    }
}
