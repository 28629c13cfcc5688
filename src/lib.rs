// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Word-position search index over local HTML files and crawled web pages.
//!
//! Documents are tokenized into lowercase words; each word maps to the
//! documents it appears in and the 1-based positions it occupies there.
//! Queries run in exact or prefix mode and come back ranked.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌───────────────┐     ┌────────────────┐
//! │   build.rs   │────▶│   index/      │────▶│   search/      │
//! │ (local files,│     │ (SearchIndex, │     │ (Query, serial │
//! │  web crawl)  │     │ ConcurrentIdx)│     │  and threaded) │
//! └──────┬───────┘     └───────┬───────┘     └────────┬───────┘
//!        │                     │                      │
//!        ▼                     ▼                      ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │ runtime::TaskQueue (worker pool)  ·  util::SharedLock (RW)   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use quarry::{SearchIndex, SearchMode};
//!
//! let mut index = SearchIndex::new();
//! index.add_all(&["the", "cat", "sat"], "a.html");
//! index.add_all(&["the", "cats", "ran"], "b.html");
//!
//! let results = index.search(&["cat"], SearchMode::Partial);
//! assert_eq!(results.len(), 2);
//! assert_eq!(results[0].doc_id, "a.html");
//! ```

pub mod build;
pub mod config;
pub mod crawl;
pub mod engine;
pub mod error;
pub mod index;
pub mod output;
pub mod runtime;
pub mod scoring;
pub mod search;
pub mod testing;
pub mod types;
pub mod util;

pub use config::{Args, Config, QuerySource, Source};
pub use engine::{run, Engine, RunSummary};
pub use error::{BuildError, ConfigError, CrawlError, Error, OutputError, QueryError, Result};
pub use index::{ConcurrentIndex, PositionIndex, SearchIndex, Searchable};
pub use runtime::{QueueHandle, TaskQueue};
pub use search::{Query, ResultMap};
pub use types::{Position, SearchMode, SearchResult};
pub use util::SharedLock;
