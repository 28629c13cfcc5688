// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Command-line arguments and the validated run configuration.
//!
//! Flags are accepted with one dash or two (`-path` and `--path`); single-dash
//! spellings of known flags are rewritten before clap sees them.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;
use url::Url;

use crate::crawl::{parse_seed, FetchConfig};
use crate::error::ConfigError;
use crate::runtime::DEFAULT_WORKERS;
use crate::types::SearchMode;

/// Workers used when `--threads` has no usable value.
pub const DEFAULT_THREADS: usize = DEFAULT_WORKERS;
/// Pages crawled when `--limit` has no usable value.
pub const DEFAULT_LIMIT: usize = 50;
pub const DEFAULT_INDEX_PATH: &str = "index.json";
pub const DEFAULT_RESULTS_PATH: &str = "results.json";

const FLAGS: &[&str] = &[
    "path", "url", "limit", "threads", "query", "queryLine", "exact", "index", "results",
];

#[derive(Parser, Debug, Default)]
#[command(
    name = "quarry",
    about = "Build a word-position index from local HTML or a web crawl and run ranked queries",
    version
)]
pub struct Args {
    /// HTML file or directory to index
    #[arg(long, num_args = 0..=1)]
    pub path: Option<Option<PathBuf>>,

    /// Seed URL to crawl and index
    #[arg(long)]
    pub url: Option<String>,

    /// Maximum pages to crawl [default: 50]
    #[arg(long, allow_negative_numbers = true)]
    pub limit: Option<String>,

    /// Use a worker pool; optional worker count [default: 5]
    #[arg(long, num_args = 0..=1, allow_negative_numbers = true)]
    pub threads: Option<Option<String>>,

    /// File with one query per line
    #[arg(long, num_args = 0..=1)]
    pub query: Option<Option<PathBuf>>,

    /// A single query given inline
    #[arg(long = "queryLine", alias = "query-line")]
    pub query_line: Option<String>,

    /// Match whole words instead of prefixes
    #[arg(long)]
    pub exact: bool,

    /// Write the index as JSON [default: index.json]
    #[arg(long, num_args = 0..=1)]
    pub index: Option<Option<PathBuf>>,

    /// Write query results as JSON [default: results.json]
    #[arg(long, num_args = 0..=1)]
    pub results: Option<Option<PathBuf>>,
}

impl Args {
    /// Parse a full argv (program name first), accepting legacy single-dash flags.
    pub fn try_parse_legacy<I, T>(argv: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(normalize_legacy_args(argv))
    }
}

/// Rewrite `-flag` to `--flag` for every known flag name.
///
/// Values (including ones that start with a dash) are left alone.
pub fn normalize_legacy_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            let rewritten = arg
                .to_str()
                .and_then(|s| s.strip_prefix('-'))
                .filter(|name| FLAGS.contains(name))
                .map(|name| OsString::from(format!("--{name}")));
            rewritten.unwrap_or(arg)
        })
        .collect()
}

/// Where documents come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Local file or directory; `workers` is set when `--threads` was given.
    Local { path: PathBuf, workers: Option<usize> },
    /// Crawl from `seed`, indexing at most `limit` pages, always on a worker pool.
    Web { seed: Url, limit: usize, workers: usize },
}

/// Where queries come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuerySource {
    File(PathBuf),
    Line(String),
}

/// A validated run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub source: Source,
    pub queries: Option<QuerySource>,
    pub mode: SearchMode,
    pub index_output: Option<PathBuf>,
    pub results_output: Option<PathBuf>,
    pub fetch: FetchConfig,
}

impl Config {
    /// Validate `args` and fill in defaults.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingSource`] without `--path` or `--url` values
    /// - [`ConfigError::PathNotFound`] when `--path` does not exist
    /// - [`ConfigError::InvalidUrl`] when `--url` is not an http(s) URL
    /// - [`ConfigError::MissingQueryPath`] / [`ConfigError::QueryPathNotFound`]
    ///   for a bad `--query`
    pub fn from_args(args: Args) -> Result<Self, ConfigError> {
        let workers = args.threads.as_ref().map(|value| {
            value
                .as_deref()
                .and_then(parse_positive)
                .unwrap_or(DEFAULT_THREADS)
        });

        let source = match (args.path.flatten(), args.url) {
            (Some(path), _) => {
                if !path.exists() {
                    return Err(ConfigError::PathNotFound(path));
                }
                Source::Local { path, workers }
            }
            (None, Some(url)) => {
                let seed = parse_seed(&url).map_err(|e| ConfigError::InvalidUrl {
                    url: url.clone(),
                    reason: e.to_string(),
                })?;
                let limit = args
                    .limit
                    .as_deref()
                    .and_then(parse_positive)
                    .unwrap_or(DEFAULT_LIMIT);
                Source::Web {
                    seed,
                    limit,
                    workers: workers.unwrap_or(DEFAULT_THREADS),
                }
            }
            (None, None) => return Err(ConfigError::MissingSource),
        };

        let queries = match (args.query, args.query_line) {
            (Some(None), _) => return Err(ConfigError::MissingQueryPath),
            (Some(Some(path)), _) => {
                if !path.is_file() {
                    return Err(ConfigError::QueryPathNotFound(path));
                }
                Some(QuerySource::File(path))
            }
            (None, Some(line)) => Some(QuerySource::Line(line)),
            (None, None) => None,
        };

        Ok(Self {
            source,
            queries,
            mode: SearchMode::from_exact_flag(args.exact),
            index_output: args
                .index
                .map(|path| path.unwrap_or_else(|| PathBuf::from(DEFAULT_INDEX_PATH))),
            results_output: args
                .results
                .map(|path| path.unwrap_or_else(|| PathBuf::from(DEFAULT_RESULTS_PATH))),
            fetch: FetchConfig::default(),
        })
    }

    /// Worker count if this run uses a pool.
    pub fn workers(&self) -> Option<usize> {
        match &self.source {
            Source::Local { workers, .. } => *workers,
            Source::Web { workers, .. } => Some(*workers),
        }
    }
}

fn parse_positive(value: &str) -> Option<usize> {
    value.trim().parse::<i64>().ok().filter(|&n| n >= 1).map(|n| n as usize)
}
