//! Character trie holding the word vocabulary and its usage counts.
//!
//! Every input is case folded (`unicode::fold_word`) before it is walked, so
//! the tree never stores mixed-case keys. Nodes own their children by value;
//! deleting a word prunes every ancestor that no longer leads to a word.

mod node;

pub use node::{Node, MAX_FREQUENCY};

use std::fmt;

use serde::Serialize;

use crate::unicode::{fold_chars, fold_word};

/// Longest accepted word, in folded characters.
pub const DEFAULT_MAX_WORD_LEN: usize = 512;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WordError {
    #[error("empty word")]
    Empty,

    #[error("word is {len} characters long (max {max})")]
    TooLong { len: usize, max: usize },
}

/// A word and its frequency, produced by traversal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct WordEntry {
    pub text: String,
    pub frequency: u32,
}

impl WordEntry {
    pub fn new(text: impl Into<String>, frequency: u32) -> Self {
        Self {
            text: text.into(),
            frequency,
        }
    }
}

pub struct Trie {
    root: Node,
    max_word_len: usize,
    /// Number of terminal nodes.
    len: usize,
}

impl fmt::Debug for Trie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Trie")
            .field("len", &self.len)
            .field("nodes", &self.node_count())
            .field("max_word_len", &self.max_word_len)
            .finish()
    }
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

impl Trie {
    pub fn new() -> Self {
        Self::with_max_word_len(DEFAULT_MAX_WORD_LEN)
    }

    pub fn with_max_word_len(max_word_len: usize) -> Self {
        Self {
            root: Node::new(),
            max_word_len: max_word_len.max(1),
            len: 0,
        }
    }

    /// Wrap a decoded root. `len` must equal the number of terminal nodes.
    pub(crate) fn from_root(root: Node, max_word_len: usize, len: usize) -> Self {
        Self {
            root,
            max_word_len: max_word_len.max(1),
            len,
        }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn max_word_len(&self) -> usize {
        self.max_word_len
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of nodes, root included.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.edges().iter().map(|(_, child)| child));
        }
        count
    }

    /// Insert one use of `word`. Returns its frequency after the insert.
    pub fn insert(&mut self, word: &str) -> Result<u32, WordError> {
        let folded = self.check_word(word)?;
        let mut node = &mut self.root;
        for ch in folded.chars() {
            node = node.add_child(ch);
        }
        if !node.is_terminal() {
            self.len += 1;
        }
        Ok(node.record_use())
    }

    /// Frequency of `word`, or `None` if it is not a stored word.
    pub fn search(&self, word: &str) -> Option<u32> {
        self.find_node(word)
            .filter(|node| node.is_terminal())
            .map(Node::frequency)
    }

    /// Count one more use of an existing word. `None` if the word is absent.
    pub fn increment(&mut self, word: &str) -> Option<u32> {
        let mut node = &mut self.root;
        for ch in fold_chars(word) {
            node = node.find_child_mut(ch)?;
        }
        node.is_terminal().then(|| node.record_use())
    }

    /// Whether any stored word starts with `prefix`.
    pub fn contains_prefix(&self, prefix: &str) -> bool {
        self.find_node(prefix).is_some()
    }

    /// Remove `word`, pruning ancestors left without words below them.
    ///
    /// Returns `false` (and leaves the tree untouched) if the word is absent.
    pub fn delete(&mut self, word: &str) -> bool {
        let path: Vec<char> = fold_chars(word).collect();
        if path.is_empty() || path.len() > self.max_word_len {
            return false;
        }
        let removed = match plan_removal(&self.root, &path) {
            None => false,
            Some(Removal::Unmark) => descend_mut(&mut self.root, &path)
                .map(Node::clear_terminal)
                .is_some(),
            Some(Removal::Detach { depth }) => descend_mut(&mut self.root, &path[..depth])
                .and_then(|node| node.remove_child(path[depth]))
                .is_some(),
        };
        if removed {
            self.len -= 1;
        }
        removed
    }

    /// Every word in depth-first descent order (unsorted).
    pub fn traverse_all(&self) -> Vec<WordEntry> {
        collect_words(&self.root, String::new())
    }

    /// Every word under `prefix`, texts prefixed by the folded `prefix`.
    ///
    /// An empty prefix enumerates the whole trie; an unknown prefix yields
    /// an empty vec.
    pub fn traverse_prefix(&self, prefix: &str) -> Vec<WordEntry> {
        let folded = fold_word(prefix);
        match self.find_folded(&folded) {
            Some(node) => collect_words(node, folded),
            None => Vec::new(),
        }
    }

    fn find_node(&self, key: &str) -> Option<&Node> {
        let mut node = &self.root;
        for ch in fold_chars(key) {
            node = node.find_child(ch)?;
        }
        Some(node)
    }

    fn find_folded(&self, folded: &str) -> Option<&Node> {
        folded
            .chars()
            .try_fold(&self.root, |node, ch| node.find_child(ch))
    }

    fn check_word(&self, word: &str) -> Result<String, WordError> {
        let folded = fold_word(word);
        let len = folded.chars().count();
        if len == 0 {
            return Err(WordError::Empty);
        }
        if len > self.max_word_len {
            return Err(WordError::TooLong {
                len,
                max: self.max_word_len,
            });
        }
        Ok(folded)
    }
}

enum Removal {
    /// The word's node still leads to other words; only its mark goes.
    Unmark,
    /// Drop the edge `path[depth]` leaving the node at `depth`, with the
    /// whole single-word chain below it.
    Detach { depth: usize },
}

/// Decide how to remove `path` without touching the tree. `None` if the word
/// is absent.
///
/// The cut goes below the deepest ancestor that must survive because it
/// ends a word or branches.
fn plan_removal(root: &Node, path: &[char]) -> Option<Removal> {
    let mut node = root;
    let mut cut = 0;
    for (depth, &ch) in path.iter().enumerate() {
        if depth > 0 && (node.is_terminal() || node.child_count() > 1) {
            cut = depth;
        }
        node = node.find_child(ch)?;
    }
    if !node.is_terminal() {
        return None;
    }
    if node.child_count() > 0 {
        Some(Removal::Unmark)
    } else {
        Some(Removal::Detach { depth: cut })
    }
}

fn descend_mut<'a>(node: &'a mut Node, path: &[char]) -> Option<&'a mut Node> {
    path.iter().try_fold(node, |node, &ch| node.find_child_mut(ch))
}

/// Depth-first walk below `start`, with `text` as the path spelled so far.
fn collect_words(start: &Node, mut text: String) -> Vec<WordEntry> {
    let mut entries = Vec::new();
    if start.is_terminal() {
        entries.push(WordEntry::new(text.clone(), start.frequency()));
    }
    let mut stack = vec![start.edges().iter()];
    while let Some(edges) = stack.last_mut() {
        match edges.next() {
            Some((ch, child)) => {
                text.push(*ch);
                if child.is_terminal() {
                    entries.push(WordEntry::new(text.clone(), child.frequency()));
                }
                stack.push(child.edges().iter());
            }
            None => {
                stack.pop();
                // The start node's own iterator has no edge char to undo.
                if !stack.is_empty() {
                    text.pop();
                }
            }
        }
    }
    entries
}
