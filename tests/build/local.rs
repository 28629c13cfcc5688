//! Local file discovery and index builds.

use std::sync::Arc;

use indicatif::ProgressBar;
use quarry::build::{build_local, build_local_threaded, find_html_files};
use quarry::{BuildError, ConcurrentIndex, SearchIndex, SearchMode, TaskQueue};
use tempfile::TempDir;

use super::common::write_files;

fn library() -> TempDir {
    let dir = TempDir::new().expect("tempdir");
    write_files(
        dir.path(),
        &[
            ("index.html", "<html><body><h1>Library</h1><p>Books about cats.</p></body></html>"),
            ("shelf/one.htm", "<p>The cat and the catalog</p>"),
            ("shelf/deep/two.HTML", "<script>var cat = 1;</script><p>Caterpillars eat</p>"),
            ("shelf/notes.txt", "cat cat cat cat"),
            ("shelf/deep/img.png", "not text"),
        ],
    )
    .expect("fixtures");
    dir
}

#[test]
fn discovery_finds_html_at_any_depth() {
    let dir = library();
    let files = find_html_files(dir.path()).expect("walk");
    let names: Vec<_> = files
        .iter()
        .map(|p| p.strip_prefix(dir.path()).expect("under root").to_path_buf())
        .collect();

    assert_eq!(names.len(), 3);
    assert!(names.iter().any(|p| p.ends_with("index.html")));
    assert!(names.iter().any(|p| p.ends_with("one.htm")));
    assert!(names.iter().any(|p| p.ends_with("two.HTML")));
}

#[test]
fn serial_build_indexes_visible_text_only() {
    let dir = library();
    let mut index = SearchIndex::new();
    let built = build_local(dir.path(), &mut index).expect("build");

    assert_eq!(built, 3);
    assert_eq!(index.documents().len(), 3);
    // Script bodies are not text.
    assert!(!index.contains("var"));

    let results = index.search(&["cat"], SearchMode::Partial);
    assert_eq!(results.len(), 3);
    let one = dir.path().join("shelf/one.htm").display().to_string();
    assert_eq!(results[0].doc_id, one);
    assert_eq!(results[0].frequency, 2);
}

#[test]
fn threaded_build_matches_serial_build() {
    let dir = library();

    let mut serial = SearchIndex::new();
    build_local(dir.path(), &mut serial).expect("serial build");

    let queue = TaskQueue::new(3).expect("queue");
    let shared = Arc::new(ConcurrentIndex::new());
    let built = build_local_threaded(dir.path(), &queue, Arc::clone(&shared), &ProgressBar::hidden())
        .expect("threaded build");
    drop(queue);

    assert_eq!(built, 3);
    assert_eq!(shared.snapshot(), serial);
}

#[test]
fn single_file_root_is_indexed() {
    let dir = library();
    let mut index = SearchIndex::new();
    let built = build_local(&dir.path().join("shelf/one.htm"), &mut index).expect("build");

    assert_eq!(built, 1);
    assert_eq!(index.count("the", &dir.path().join("shelf/one.htm").display().to_string()), 2);
}

#[test]
fn missing_root_is_an_error() {
    let dir = TempDir::new().expect("tempdir");
    let mut index = SearchIndex::new();
    let err = build_local(&dir.path().join("absent"), &mut index).unwrap_err();
    assert!(matches!(err, BuildError::Walk { .. }), "{err:?}");
}
