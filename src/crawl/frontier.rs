// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Capped, duplicate-free, discovery-ordered set of crawled URLs.
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **CAPPED**: `len() <= cap()` at every instant.
//! 2. **UNIQUE**: an id is appended at most once, so it is indexed at most once.
//! 3. **ORDERED**: ids are kept in the order they were accepted.

use std::collections::HashSet;

use parking_lot::Mutex;

#[derive(Debug, Default)]
struct FrontierState {
    order: Vec<String>,
    seen: HashSet<String>,
}

impl FrontierState {
    fn try_push(&mut self, cap: usize, id: &str) -> bool {
        if self.order.len() >= cap || self.seen.contains(id) {
            return false;
        }
        self.seen.insert(id.to_string());
        self.order.push(id.to_string());
        true
    }
}

/// Shared across crawl tasks; guarded by its own mutex, separate from the index lock.
#[derive(Debug)]
pub struct Frontier {
    cap: usize,
    state: Mutex<FrontierState>,
}

impl Frontier {
    pub fn new(cap: usize) -> Self {
        Self {
            cap,
            state: Mutex::new(FrontierState::default()),
        }
    }

    /// Append `id` if there is room and it is not already present.
    pub fn try_push(&self, id: &str) -> bool {
        self.state.lock().try_push(self.cap, id)
    }

    /// Append each id that fits, under one lock acquisition; returns the ones appended.
    pub fn extend_new<I, S>(&self, ids: I) -> Vec<S>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut state = self.state.lock();
        let mut added = Vec::new();
        for id in ids {
            if state.order.len() >= self.cap {
                break;
            }
            if state.try_push(self.cap, id.as_ref()) {
                added.push(id);
            }
        }
        added
    }

    pub fn contains(&self, id: &str) -> bool {
        self.state.lock().seen.contains(id)
    }

    pub fn len(&self) -> usize {
        self.state.lock().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_full(&self) -> bool {
        self.len() >= self.cap
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    /// The accepted ids in discovery order.
    pub fn snapshot(&self) -> Vec<String> {
        self.state.lock().order.clone()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.state.into_inner().order
    }
}
