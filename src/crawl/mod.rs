// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Web crawling: wire-level fetches, link discovery and a capped frontier.
//!
//! Failures never leave this module as errors. A page that cannot be fetched,
//! is not HTML or contains broken links is logged and skipped.

mod crawler;
mod frontier;
mod http;
mod links;
mod url;

pub use self::crawler::crawl;
pub use self::frontier::Frontier;
pub use self::http::{build_request, parse_response, FetchConfig, Fetcher, HttpFetcher, HttpResponse};
pub use self::links::extract_links;
pub use self::url::{clean, clean_url, is_web, parse_seed, resolve};
