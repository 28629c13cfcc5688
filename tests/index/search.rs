//! Exact and partial search over a small fixed corpus.

use quarry::{SearchIndex, SearchMode, SearchResult};

use super::common::index_from;

fn cats() -> SearchIndex {
    index_from(&[("A", &["the", "cat", "sat"]), ("B", &["the", "cat", "ran"])])
}

#[test]
fn exact_ties_break_on_doc_id() {
    let results = cats().search(&["cat"], SearchMode::Exact);
    assert_eq!(
        results,
        vec![SearchResult::new("A", 1, 2), SearchResult::new("B", 1, 2)]
    );
}

#[test]
fn partial_prefix_with_one_match_equals_exact() {
    let index = cats();
    assert_eq!(
        index.search(&["ca"], SearchMode::Partial),
        index.search(&["cat"], SearchMode::Exact)
    );
}

#[test]
fn repeated_tokens_record_every_position() {
    let index = index_from(&[("D", &["a", "a", "b"])]);

    let a = index.get("a").expect("a indexed");
    assert_eq!(a.positions("D").expect("D").collect::<Vec<_>>(), vec![1, 2]);
    assert_eq!(index.count("a", "D"), 2);

    let b = index.get("b").expect("b indexed");
    assert_eq!(b.positions("D").expect("D").collect::<Vec<_>>(), vec![3]);
    assert_eq!(index.count("b", "D"), 1);
}

#[test]
fn partial_aggregates_every_matching_word() {
    let index = index_from(&[
        ("one", &["category", "dog", "cat"]),
        ("two", &["cats", "cats", "cats", "cattle"]),
        ("three", &["dog", "bird"]),
    ]);

    let results = index.search(&["ca"], SearchMode::Partial);
    assert_eq!(
        results,
        vec![SearchResult::new("two", 4, 1), SearchResult::new("one", 2, 1)]
    );
}

#[test]
fn multiple_terms_sum_frequencies() {
    let index = index_from(&[
        ("x", &["red", "fish", "blue", "fish"]),
        ("y", &["one", "fish", "two"]),
    ]);

    let results = index.search(&["blue", "fish"], SearchMode::Exact);
    assert_eq!(results[0], SearchResult::new("x", 3, 2));
    assert_eq!(results[1], SearchResult::new("y", 1, 2));
}

#[test]
fn unknown_terms_return_nothing() {
    let index = cats();
    assert!(index.search(&["dog"], SearchMode::Exact).is_empty());
    assert!(index.search(&["z"], SearchMode::Partial).is_empty());
    assert!(index.search::<&str>(&[], SearchMode::Partial).is_empty());
}

#[test]
fn frequency_beats_position() {
    let index = index_from(&[
        ("early", &["apple", "pie"]),
        ("late", &["pie", "pie", "apple", "apple"]),
    ]);
    let results = index.search(&["apple"], SearchMode::Exact);
    assert_eq!(results[0].doc_id, "late");
    assert_eq!(results[1].doc_id, "early");
}
