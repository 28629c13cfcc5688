// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query parsing.
//!
//! A query is one line of text reduced to its sorted, distinct lowercase
//! alphabetic terms. Terms go through the same word cleaning as indexed text,
//! so "Café" in a query finds "cafe" in a document.

use std::fmt;
use std::fs;
use std::path::Path;

use crate::error::QueryError;
use crate::util::parse_words;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Query {
    terms: Vec<String>,
}

impl Query {
    /// Parse one line. Returns `None` when the line has no alphabetic terms.
    pub fn parse(line: &str) -> Option<Self> {
        let spaced: String = line
            .chars()
            .map(|c| if c.is_alphabetic() { c } else { ' ' })
            .collect();
        let mut terms = parse_words(&spaced);
        terms.sort_unstable();
        terms.dedup();
        (!terms.is_empty()).then_some(Self { terms })
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// The space-joined terms, used as the key in result output.
    pub fn label(&self) -> String {
        self.terms.join(" ")
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Parse every non-empty line of `text`.
pub fn parse_queries(text: &str) -> Vec<Query> {
    text.lines().filter_map(Query::parse).collect()
}

/// Read and parse the query file at `path` (UTF-8, one query per line).
pub fn read_queries(path: &Path) -> Result<Vec<Query>, QueryError> {
    let bytes = fs::read(path).map_err(|source| QueryError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_queries(&String::from_utf8_lossy(&bytes)))
}
