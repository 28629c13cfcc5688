// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Recursive, self-scheduling crawl on the worker pool.
//!
//! One [`CrawlTask`] per frontier URL:
//!
//! 1. record its URL in the frontier (a no-op for everything but the seed)
//! 2. fetch the page once; stop if it is not HTML
//! 3. while the frontier has room, append newly discovered links and submit
//!    a crawl task for each
//! 4. submit a [`PageBuildTask`] carrying the fetched markup
//!
//! Discovery order across branches depends on scheduling; the set of URLs
//! and the cap do not.

use std::sync::Arc;

use indicatif::ProgressBar;
use tracing::{debug, info};
use url::Url;

use super::frontier::Frontier;
use super::http::Fetcher;
use super::links::extract_links;
use super::url::clean;
use crate::index::ConcurrentIndex;
use crate::runtime::{QueueHandle, TaskQueue};
use crate::util::tokenize;

/// Everything a crawl task needs, shared by all tasks of one crawl.
struct CrawlContext {
    queue: QueueHandle,
    index: Arc<ConcurrentIndex>,
    fetcher: Arc<dyn Fetcher>,
    frontier: Arc<Frontier>,
    progress: ProgressBar,
}

struct CrawlTask {
    url: Url,
    context: Arc<CrawlContext>,
}

impl CrawlTask {
    fn run(self) {
        let context = &self.context;
        context.frontier.try_push(self.url.as_str());

        let Some(html) = context.fetcher.fetch_html(&self.url) else {
            debug!(url = %self.url, "no HTML; not following");
            return;
        };

        if !context.frontier.is_full() {
            let links = extract_links(&self.url, &html);
            let found = links.len();
            let added = context.frontier.extend_new(links);
            debug!(url = %self.url, found, added = added.len(), "links discovered");

            for link in added {
                let task = CrawlTask {
                    url: link,
                    context: Arc::clone(&self.context),
                };
                context.queue.submit(move || task.run());
            }
        }

        let build = PageBuildTask {
            doc_id: self.url.to_string(),
            html,
            index: Arc::clone(&context.index),
            progress: context.progress.clone(),
        };
        context.queue.submit(move || build.run());
    }
}

/// Index one fetched page.
struct PageBuildTask {
    doc_id: String,
    html: String,
    index: Arc<ConcurrentIndex>,
    progress: ProgressBar,
}

impl PageBuildTask {
    fn run(self) {
        let words = tokenize(&self.html);
        let added = self.index.add_all(&words, &self.doc_id);
        debug!(url = %self.doc_id, words = added, "indexed page");
        self.progress.inc(1);
    }
}

/// Crawl from `seed`, indexing at most `cap` pages into `index`.
///
/// Returns once every crawl and build task has finished, with the frontier in
/// discovery order.
pub fn crawl(
    seed: &Url,
    cap: usize,
    queue: &TaskQueue,
    index: Arc<ConcurrentIndex>,
    fetcher: Arc<dyn Fetcher>,
    progress: &ProgressBar,
) -> Vec<String> {
    if cap == 0 {
        return Vec::new();
    }
    // Same identity the page's own links will resolve to.
    let seed = clean(seed.clone());

    let frontier = Arc::new(Frontier::new(cap));
    let context = Arc::new(CrawlContext {
        queue: queue.handle(),
        index,
        fetcher,
        frontier: Arc::clone(&frontier),
        progress: progress.clone(),
    });

    let task = CrawlTask {
        url: seed.clone(),
        context,
    };
    queue.submit(move || task.run());
    queue.await_idle();

    let visited = frontier.snapshot();
    info!(seed = %seed, pages = visited.len(), cap, "crawl finished");
    visited
}
