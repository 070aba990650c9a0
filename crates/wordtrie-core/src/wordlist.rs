//! Plain-text word list: one word per line, UTF-8.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::atomic::write_atomic;
use crate::trie::WordEntry;

/// Read every word from `path`.
///
/// Line endings (`\n` or `\r\n`) are stripped. Empty lines and lines that are
/// not valid UTF-8 are skipped.
pub fn read_words(path: &Path) -> io::Result<Vec<String>> {
    let reader = BufReader::new(File::open(path)?);
    let mut words = Vec::new();
    let mut skipped = 0usize;
    for line in reader.split(b'\n') {
        let mut line = line?;
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        if line.is_empty() {
            continue;
        }
        match String::from_utf8(line) {
            Ok(word) => words.push(word),
            Err(_) => skipped += 1,
        }
    }
    debug!(path = %path.display(), words = words.len(), skipped);
    Ok(words)
}

/// Overwrite `path` with the entries' words, sorted ascending, one per line.
pub fn write_words(path: &Path, entries: &[WordEntry]) -> io::Result<()> {
    let mut words: Vec<&str> = entries.iter().map(|e| e.text.as_str()).collect();
    words.sort_unstable();
    let mut body = String::with_capacity(words.iter().map(|w| w.len() + 1).sum());
    for word in &words {
        body.push_str(word);
        body.push('\n');
    }
    write_atomic(path, body.as_bytes())
}
