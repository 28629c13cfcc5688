// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! JSON output for the index and for query results.
//!
//! Index: `{ "<word>": { "<docId>": [pos, ...] } }`.
//! Results: `[ { "queries": "<label>", "results": [ {"where", "count", "index"} ] } ]`.
//! Both are pretty-printed with tab indentation.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::OutputError;
use crate::index::SearchIndex;
use crate::search::ResultMap;
use crate::types::SearchResult;

#[derive(Serialize)]
struct QueryResults<'a> {
    queries: &'a str,
    results: &'a [SearchResult],
}

fn to_pretty_writer<W: Write, T: Serialize + ?Sized>(writer: W, value: &T) -> Result<(), OutputError> {
    let mut serializer = Serializer::with_formatter(writer, PrettyFormatter::with_indent(b"\t"));
    value.serialize(&mut serializer)?;
    Ok(())
}

fn to_file<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), OutputError> {
    let io_err = |source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = BufWriter::new(File::create(path).map_err(io_err)?);
    to_pretty_writer(&mut writer, value)?;
    writer.write_all(b"\n").map_err(io_err)?;
    writer.flush().map_err(io_err)
}

pub fn write_index_to<W: Write>(writer: W, index: &SearchIndex) -> Result<(), OutputError> {
    to_pretty_writer(writer, index)
}

/// Write `index` to `path`, replacing any existing file.
pub fn write_index(path: &Path, index: &SearchIndex) -> Result<(), OutputError> {
    to_file(path, index)
}

fn results_view(results: &ResultMap) -> Vec<QueryResults<'_>> {
    results
        .iter()
        .map(|(label, hits)| QueryResults {
            queries: label,
            results: hits,
        })
        .collect()
}

pub fn write_results_to<W: Write>(writer: W, results: &ResultMap) -> Result<(), OutputError> {
    to_pretty_writer(writer, &results_view(results))
}

/// Write query results to `path`, replacing any existing file.
pub fn write_results(path: &Path, results: &ResultMap) -> Result<(), OutputError> {
    to_file(path, &results_view(results))
}
