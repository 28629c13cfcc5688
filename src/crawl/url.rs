// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! URL canonicalization for crawl deduplication.

use url::Url;

use crate::error::CrawlError;

/// Canonical form of `raw`: fragment removed, query percent-encoded.
///
/// Anything that does not parse as an absolute URL is returned unchanged.
pub fn clean_url(raw: &str) -> String {
    match Url::parse(raw) {
        Ok(url) => clean(url).into(),
        Err(_) => raw.to_string(),
    }
}

/// Drop the fragment of an already-parsed URL.
///
/// Parsing has already normalized the scheme and host case and percent-encoded
/// the path and query.
pub fn clean(mut url: Url) -> Url {
    url.set_fragment(None);
    url
}

/// Resolve `reference` against `base` and clean it. `None` if it does not resolve.
pub fn resolve(base: &Url, reference: &str) -> Option<Url> {
    base.join(reference.trim()).ok().map(clean)
}

/// Parse a crawl seed, accepting only `http`/`https`.
pub fn parse_seed(raw: &str) -> Result<Url, CrawlError> {
    let url = Url::parse(raw.trim()).map_err(|e| CrawlError::InvalidUrl(format!("{raw}: {e}")))?;
    if !is_web(&url) {
        return Err(CrawlError::UnsupportedScheme(url.scheme().to_string()));
    }
    if url.host_str().is_none() {
        return Err(CrawlError::InvalidUrl(format!("{raw}: missing host")));
    }
    Ok(clean(url))
}

pub fn is_web(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}
