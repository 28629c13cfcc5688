// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Worker-pool runtime shared by the build, crawl and search pipelines.

pub mod queue;

pub use queue::{QueueHandle, TaskQueue, DEFAULT_WORKERS};
