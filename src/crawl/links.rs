// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Lexical anchor extraction.
//!
//! No DOM is built: a single regex walks `<a ...>` tags and pulls out the
//! `href` value, whatever its quoting. Comments and script blocks are not
//! special-cased, so an anchor inside a comment still counts.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;
use url::Url;

use super::url::{is_web, resolve};

/// `<a` followed by anything up to `href`, then a double-quoted, single-quoted
/// or bare value.
static ANCHOR_HREF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<a\s[^>]*?\bhref\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#)
        .expect("anchor pattern")
});

/// Absolute, cleaned `http`/`https` links of every anchor in `html`,
/// in first-seen order without duplicates.
///
/// Relative references are resolved against `base`. `mailto:` links and
/// references that do not resolve are skipped.
pub fn extract_links(base: &Url, html: &str) -> Vec<Url> {
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for captures in ANCHOR_HREF.captures_iter(html) {
        let Some(raw) = captures
            .get(1)
            .or_else(|| captures.get(2))
            .or_else(|| captures.get(3))
        else {
            continue;
        };
        let href = raw.as_str().replace("&amp;", "&");

        if href.trim_start().to_ascii_lowercase().starts_with("mailto:") {
            continue;
        }
        let Some(link) = resolve(base, &href) else {
            trace!(href = %href, "skipping unresolvable link");
            continue;
        };
        if !is_web(&link) {
            continue;
        }
        if seen.insert(link.as_str().to_string()) {
            links.push(link);
        }
    }

    links
}
