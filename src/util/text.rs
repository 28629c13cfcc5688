// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Markup stripping and word extraction.
//!
//! Turns raw HTML into the ordered token stream the index consumes. The
//! scan is purely lexical: comments and `<script>`/`<style>` blocks go first,
//! then every remaining tag, then character entities. No DOM is built and
//! nothing recurses, so pathological nesting costs nothing extra.

use std::sync::LazyLock;

use regex::Regex;
#[cfg(feature = "unicode-normalization")]
use unicode_normalization::UnicodeNormalization;

static COMMENTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("comment pattern"));

static BLOCKS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b.*?</script\s*>|<style\b.*?</style\s*>").expect("block pattern")
});

static TAGS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("tag pattern"));

static ENTITIES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&#?[A-Za-z0-9]+;").expect("entity pattern"));

/// Remove all markup from `html`, leaving only the text a reader would see.
///
/// Tags and entities become single spaces so that `a<br>b` yields two words.
pub fn strip_html(html: &str) -> String {
    let text = COMMENTS.replace_all(html, " ");
    let text = BLOCKS.replace_all(&text, " ");
    let text = TAGS.replace_all(&text, " ");
    ENTITIES.replace_all(&text, " ").into_owned()
}

/// Split text into lowercase alphabetic words.
///
/// Words are whitespace-delimited; non-alphabetic characters inside a word are
/// dropped ("don't" → "dont", "x86" → "x"), and diacritics are folded away
/// ("café" → "cafe").
pub fn parse_words(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(clean_word)
        .filter(|word| !word.is_empty())
        .collect()
}

/// Markup to tokens: `parse_words(strip_html(html))`.
pub fn tokenize(html: &str) -> Vec<String> {
    parse_words(&strip_html(html))
}

#[cfg(feature = "unicode-normalization")]
fn clean_word(raw: &str) -> String {
    raw.nfd()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Without the normalization tables, diacritic-bearing letters are kept as-is.
#[cfg(not(feature = "unicode-normalization"))]
fn clean_word(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect()
}
