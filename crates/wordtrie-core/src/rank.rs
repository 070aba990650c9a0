//! Frequency ranking, prefix completion and spell suggestion.
//!
//! All rankings share one tie-break: equal keys fall back to ascending
//! code-point order of the word, so output is deterministic.

use std::cmp::Ordering;

use serde::Serialize;
use tracing::{debug, debug_span};

use crate::distance::levenshtein;
use crate::trie::{Trie, WordEntry};
use crate::unicode::fold_word;

/// A vocabulary word with its edit distance to the query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    #[serde(flatten)]
    pub entry: WordEntry,
    pub distance: usize,
}

/// Frequency descending, then word ascending.
pub fn by_frequency(a: &WordEntry, b: &WordEntry) -> Ordering {
    b.frequency
        .cmp(&a.frequency)
        .then_with(|| a.text.cmp(&b.text))
}

/// Distance ascending, then frequency descending, then word ascending.
pub fn by_distance(a: &Suggestion, b: &Suggestion) -> Ordering {
    a.distance
        .cmp(&b.distance)
        .then_with(|| by_frequency(&a.entry, &b.entry))
}

fn rank(mut entries: Vec<WordEntry>, k: usize) -> Vec<WordEntry> {
    entries.sort_by(by_frequency);
    entries.truncate(k);
    entries
}

/// The `k` most frequent words (fewer if the vocabulary is smaller).
pub fn top_k(trie: &Trie, k: usize) -> Vec<WordEntry> {
    let _span = debug_span!("top_k", k).entered();
    let ranked = rank(trie.traverse_all(), k);
    debug!(result_count = ranked.len());
    ranked
}

/// The `k` most frequent words starting with `prefix`.
///
/// An unknown prefix gives an empty vec, not an error.
pub fn autocomplete(trie: &Trie, prefix: &str, k: usize) -> Vec<WordEntry> {
    let _span = debug_span!("autocomplete", prefix, k).entered();
    let ranked = rank(trie.traverse_prefix(prefix), k);
    debug!(result_count = ranked.len());
    ranked
}

/// The `k` vocabulary words closest to `query` by edit distance.
///
/// Scans the whole vocabulary: O(words × word_len²).
pub fn spell_suggest(trie: &Trie, query: &str, k: usize) -> Vec<Suggestion> {
    let _span = debug_span!("spell_suggest", query, k).entered();
    let query = fold_word(query);
    let mut scored: Vec<Suggestion> = trie
        .traverse_all()
        .into_iter()
        .map(|entry| Suggestion {
            distance: levenshtein(&query, &entry.text),
            entry,
        })
        .collect();
    let scanned = scored.len();
    scored.sort_by(by_distance);
    scored.truncate(k);
    debug!(
        scanned,
        result_count = scored.len(),
        best_distance = scored.first().map(|s| s.distance),
    );
    scored
}
