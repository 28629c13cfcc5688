// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Low-level helpers: the index lock and the text normalizer.

pub mod shared_lock;
pub mod text;

pub use shared_lock::{Holders, SharedLock, SharedReadGuard, SharedWriteGuard};
pub use text::{parse_words, strip_html, tokenize};
