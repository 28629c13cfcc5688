// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Local document discovery.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::BuildError;

/// True for `.html` / `.htm` in any case.
pub fn is_html_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm"))
}

/// Every HTML file at or under `root`, sorted.
///
/// A file root is returned as-is when it has an HTML extension. Directories
/// are walked with an explicit stack; unreadable subdirectories are logged
/// and skipped.
///
/// # Errors
///
/// `BuildError::Walk` if `root` itself cannot be inspected or listed.
pub fn find_html_files(root: &Path) -> Result<Vec<PathBuf>, BuildError> {
    let walk_err = |source| BuildError::Walk {
        path: root.to_path_buf(),
        source,
    };
    let meta = fs::metadata(root).map_err(walk_err)?;
    if meta.is_file() {
        return Ok(if is_html_file(root) {
            vec![root.to_path_buf()]
        } else {
            Vec::new()
        });
    }

    let mut files = Vec::new();
    let mut pending = vec![root.to_path_buf()];
    let mut first = true;

    while let Some(dir) = pending.pop() {
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if first => return Err(walk_err(e)),
            Err(e) => {
                warn!(path = %dir.display(), error = %e, "skipping unreadable directory");
                continue;
            }
        };
        first = false;

        for entry in entries.flatten() {
            let path = entry.path();
            match entry.file_type() {
                Ok(kind) if kind.is_dir() => pending.push(path),
                Ok(_) if path.is_file() && is_html_file(&path) => files.push(path),
                Ok(_) => {}
                Err(e) => warn!(path = %path.display(), error = %e, "skipping entry"),
            }
        }
    }

    files.sort();
    Ok(files)
}
