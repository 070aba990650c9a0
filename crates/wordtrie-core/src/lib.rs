//! Prefix-indexed word dictionary: autocomplete, spell suggestion and
//! usage-frequency ranking over a case-folded character trie, with a compact
//! binary snapshot format.

mod atomic;
pub mod distance;
pub mod lexicon;
pub mod rank;
pub mod settings;
pub mod snapshot;
pub mod trie;
pub mod unicode;
pub mod wordlist;

pub use lexicon::{Lexicon, LexiconStats, LoadSource, Selection};
pub use rank::Suggestion;
pub use trie::{Trie, WordEntry, WordError};
