// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error types, one enum per concern.
//!
//! Only configuration errors abort a run. Everything raised while fetching,
//! reading or parsing an individual document is logged where it happens and
//! the document is skipped, so `CrawlError` and `BuildError` rarely escape
//! their modules.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Invalid or missing command-line input.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("There is no specified path.")]
    MissingSource,

    #[error("Path {0} does not exist or is not a file or directory")]
    PathNotFound(PathBuf),

    #[error("There is no specified query path.")]
    MissingQueryPath,

    #[error("Query path {0} does not exist")]
    QueryPathNotFound(PathBuf),

    #[error("Invalid seed URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Failures while fetching or interpreting a web page.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Unsupported scheme: {0} (only http/https allowed)")]
    UnsupportedScheme(String),

    #[error("Could not resolve host {0}")]
    UnresolvedHost(String),

    #[error("I/O error talking to {host}: {source}")]
    Io {
        host: String,
        #[source]
        source: io::Error,
    },

    #[error("TLS error: {0}")]
    Tls(#[from] rustls::Error),

    #[error("Malformed HTTP response: {0}")]
    MalformedResponse(String),
}

/// Failures while reading local documents.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to list {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to start worker threads: {0}")]
    Spawn(#[source] io::Error),

    #[error(transparent)]
    Crawl(#[from] CrawlError),
}

/// Failures while writing JSON output.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures while loading queries.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Failed to read queries from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Crate-level error returned by [`crate::Engine`].
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Output(#[from] OutputError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
