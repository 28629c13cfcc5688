// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::process;

use anyhow::{Context, Result};
use indicatif::ProgressBar;
use tracing_subscriber::EnvFilter;

use quarry::build::progress_style;
use quarry::{Args, Config};

fn main() {
    init_logging();

    let args = match Args::try_parse_legacy(std::env::args_os()) {
        Ok(args) => args,
        Err(e) => e.exit(),
    };

    if let Err(e) = run(args) {
        eprintln!("❌ {e:#}");
        process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: Args) -> Result<()> {
    let config = Config::from_args(args)?;

    let progress = ProgressBar::new(0);
    progress.set_style(progress_style());
    progress.set_prefix("Indexing");

    let summary = quarry::run(&config, &progress).context("run failed")?;
    eprintln!(
        "✓ {} documents, {} words, {} queries",
        summary.documents, summary.words, summary.queries
    );
    Ok(())
}
