// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Ranking of search results.
//!
//! Frequency dominates, then the earliest match, then the document id.

pub mod ranking;

pub use ranking::{compare_results, rank};
