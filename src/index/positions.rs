// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Per-word posting map: document id → ordered set of positions.
//!
//! # Invariants
//!
//! 1. **POSITIONS_UNIQUE**: re-adding a position is a no-op.
//! 2. **POSITIONS_SORTED**: positions iterate in ascending order.
//! 3. **COUNT_IS_SET_SIZE**: `count(doc)` is the number of distinct positions.
//! 4. **DOCS_SORTED**: documents iterate in lexicographic order.
//! 5. **NON_EMPTY**: every document entry holds at least one position.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::types::Position;

/// Serializes as `{ "<docId>": [pos, ...], ... }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PositionIndex {
    docs: BTreeMap<String, BTreeSet<Position>>,
}

impl PositionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `position` for `doc_id`. Returns `false` if it was already present.
    pub fn add(&mut self, doc_id: &str, position: Position) -> bool {
        match self.docs.get_mut(doc_id) {
            Some(positions) => positions.insert(position),
            None => {
                self.docs
                    .insert(doc_id.to_string(), BTreeSet::from([position]));
                true
            }
        }
    }

    /// Number of distinct positions recorded for `doc_id` (0 if absent).
    pub fn count(&self, doc_id: &str) -> usize {
        self.docs.get(doc_id).map_or(0, BTreeSet::len)
    }

    /// Number of documents with at least one position.
    pub fn num_docs(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    pub fn contains(&self, doc_id: &str) -> bool {
        self.docs.contains_key(doc_id)
    }

    pub fn contains_position(&self, doc_id: &str, position: Position) -> bool {
        self.docs
            .get(doc_id)
            .is_some_and(|positions| positions.contains(&position))
    }

    /// Document ids in lexicographic order.
    pub fn docs(&self) -> impl Iterator<Item = &str> + '_ {
        self.docs.keys().map(String::as_str)
    }

    /// Positions for `doc_id` in ascending order, if the document is present.
    pub fn positions(&self, doc_id: &str) -> Option<impl Iterator<Item = Position> + '_> {
        self.docs.get(doc_id).map(|positions| positions.iter().copied())
    }

    /// Smallest position recorded for `doc_id`.
    pub fn first_position(&self, doc_id: &str) -> Option<Position> {
        self.docs.get(doc_id).and_then(|positions| positions.first().copied())
    }

    /// `(doc_id, count, first_position)` for every document, in doc order.
    ///
    /// This is the per-document aggregate a search folds into its results.
    pub fn summaries(&self) -> impl Iterator<Item = (&str, usize, Position)> + '_ {
        self.docs.iter().filter_map(|(doc_id, positions)| {
            positions
                .first()
                .map(|&first| (doc_id.as_str(), positions.len(), first))
        })
    }

    /// Iterate `(doc_id, positions)` pairs in doc order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<Position>)> + '_ {
        self.docs.iter().map(|(doc_id, positions)| (doc_id.as_str(), positions))
    }
}
