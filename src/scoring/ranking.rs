// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Result ranking: how search results get sorted.
//!
//! There is no scoring formula. A result's rank comes straight from the two
//! aggregates the search produced, with the document id as the last word so
//! that output never depends on insertion or scheduling order.

use crate::types::SearchResult;
use std::cmp::Ordering;

/// Compare two search results for ranking.
///
/// Sort order:
/// 1. **Frequency** - descending (more matched positions wins)
/// 2. **First position** - ascending (earlier first match wins)
/// 3. **Doc id** - ascending lexicographic, final tiebreaker
///
/// Two results compare `Equal` only when all three fields are equal, which a
/// single search never produces (one result per document).
pub fn compare_results(a: &SearchResult, b: &SearchResult) -> Ordering {
    b.frequency
        .cmp(&a.frequency)
        .then_with(|| a.first_position.cmp(&b.first_position))
        .then_with(|| a.doc_id.cmp(&b.doc_id))
}

/// Sort results into final ranked order in place.
pub fn rank(results: &mut [SearchResult]) {
    results.sort_unstable_by(compare_results);
}
