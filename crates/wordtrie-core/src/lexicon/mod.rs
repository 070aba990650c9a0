//! The dictionary handle the outside world talks to.
//!
//! `Lexicon` owns one trie and exposes the query interface: insert, search,
//! delete, ranked lookups, and snapshot / word-list persistence. It is also
//! where the frequency policy lives:
//!
//! - `search` never changes a frequency;
//! - `select` (an accepted suggestion) always counts a use, inserting the
//!   word if needed;
//! - `record_hit` (a search typed by the user) counts a use only when
//!   `frequency.count_search_hits` is enabled.

#[cfg(test)]
mod tests;

use std::io;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::rank::{self, Suggestion};
use crate::settings::Settings;
use crate::snapshot::{self, SnapshotError};
use crate::trie::{Trie, WordEntry, WordError, DEFAULT_MAX_WORD_LEN};
use crate::wordlist;

/// Outcome of accepting a suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// The word existed; this is its new frequency.
    Bumped(u32),
    /// The word was new and now has frequency 1.
    Inserted,
}

/// Where `Lexicon::open` got its words from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Snapshot,
    /// Text word list, with the number of words read.
    Text(usize),
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexiconStats {
    pub words: usize,
    pub nodes: usize,
}

pub struct Lexicon {
    trie: Trie,
    count_search_hits: bool,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::new()
    }
}

impl Lexicon {
    pub fn new() -> Self {
        Self::with_options(DEFAULT_MAX_WORD_LEN, false)
    }

    pub fn with_options(max_word_len: usize, count_search_hits: bool) -> Self {
        Self {
            trie: Trie::with_max_word_len(max_word_len),
            count_search_hits,
        }
    }

    pub fn from_settings(s: &Settings) -> Self {
        Self::with_options(s.limits.max_word_len, s.frequency.count_search_hits)
    }

    /// Load the configured snapshot, falling back to the text word list, then
    /// to an empty dictionary. Failures along the way are logged, not returned.
    pub fn open(s: &Settings) -> (Self, LoadSource) {
        Self::open_paths(
            s,
            &s.files.snapshot_path(),
            &s.files.text_dictionary_path(),
        )
    }

    /// [`Lexicon::open`] with explicit file locations in place of `s.files`.
    pub fn open_paths(
        s: &Settings,
        snapshot_path: &Path,
        text_path: &Path,
    ) -> (Self, LoadSource) {
        let mut lexicon = Self::from_settings(s);

        match lexicon.load_snapshot(snapshot_path) {
            Ok(()) => {
                info!(path = %snapshot_path.display(), words = lexicon.trie.len(), "loaded snapshot");
                return (lexicon, LoadSource::Snapshot);
            }
            Err(e) if e.is_not_found() => {
                debug!(path = %snapshot_path.display(), "no snapshot");
            }
            Err(e) => {
                warn!(path = %snapshot_path.display(), error = %e, "snapshot unavailable");
            }
        }

        match lexicon.load_text(text_path) {
            Ok(count) => {
                info!(path = %text_path.display(), words = count, "loaded word list");
                (lexicon, LoadSource::Text(count))
            }
            Err(e) => {
                debug!(path = %text_path.display(), error = %e, "no word list");
                (lexicon, LoadSource::Empty)
            }
        }
    }

    pub fn trie(&self) -> &Trie {
        &self.trie
    }

    pub fn counts_search_hits(&self) -> bool {
        self.count_search_hits
    }

    pub fn stats(&self) -> LexiconStats {
        LexiconStats {
            words: self.trie.len(),
            nodes: self.trie.node_count(),
        }
    }

    /// Insert one use of `word`. Returns its new frequency.
    pub fn insert(&mut self, word: &str) -> Result<u32, WordError> {
        self.trie.insert(word)
    }

    /// Frequency of `word` if present. Never mutates.
    pub fn search(&self, word: &str) -> Option<u32> {
        self.trie.search(word)
    }

    /// Search on behalf of a user; counts a use when configured to.
    pub fn record_hit(&mut self, word: &str) -> Option<u32> {
        if self.count_search_hits {
            self.trie.increment(word)
        } else {
            self.trie.search(word)
        }
    }

    pub fn delete(&mut self, word: &str) -> bool {
        self.trie.delete(word)
    }

    /// Accept a suggestion: count a use of `word`, inserting it if absent.
    pub fn select(&mut self, word: &str) -> Result<Selection, WordError> {
        if let Some(frequency) = self.trie.increment(word) {
            return Ok(Selection::Bumped(frequency));
        }
        self.trie.insert(word)?;
        Ok(Selection::Inserted)
    }

    pub fn autocomplete(&self, prefix: &str, k: usize) -> Vec<WordEntry> {
        rank::autocomplete(&self.trie, prefix, k)
    }

    pub fn top_k(&self, k: usize) -> Vec<WordEntry> {
        rank::top_k(&self.trie, k)
    }

    pub fn spell_suggest(&self, query: &str, k: usize) -> Vec<Suggestion> {
        rank::spell_suggest(&self.trie, query, k)
    }

    pub fn save_snapshot(&self, path: &Path) -> Result<(), SnapshotError> {
        snapshot::save(&self.trie, path)
    }

    /// Replace the dictionary with a snapshot.
    ///
    /// The snapshot is decoded into a fresh trie first; on any error the
    /// current dictionary is left untouched.
    pub fn load_snapshot(&mut self, path: &Path) -> Result<(), SnapshotError> {
        let trie = snapshot::open(path, self.trie.max_word_len())?;
        self.trie = trie;
        Ok(())
    }

    /// Add every word of a text word list. An unreadable file adds nothing.
    pub fn import_text(&mut self, path: &Path) -> usize {
        match self.load_text(path) {
            Ok(count) => count,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not read word list");
                0
            }
        }
    }

    /// Overwrite `path` with all words, sorted, one per line.
    pub fn export_text(&self, path: &Path) -> io::Result<()> {
        wordlist::write_words(path, &self.trie.traverse_all())
    }

    fn load_text(&mut self, path: &Path) -> io::Result<usize> {
        let words = wordlist::read_words(path)?;
        let mut inserted = 0;
        let mut rejected = 0;
        for word in &words {
            match self.trie.insert(word) {
                Ok(_) => inserted += 1,
                Err(_) => rejected += 1,
            }
        }
        if rejected > 0 {
            warn!(path = %path.display(), rejected, "skipped words over the length limit");
        }
        Ok(inserted)
    }
}
