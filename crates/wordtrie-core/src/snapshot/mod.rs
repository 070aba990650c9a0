//! Binary snapshot of a whole trie.
//!
//! Layout, all fields little-endian:
//!
//! ```text
//! Node  := is_end:i32  frequency:i32  child_count:i32  Child*
//! Child := char_code:u32  Node
//! ```
//!
//! Nodes are written in pre-order, children in their in-memory order. There
//! is no header; an empty trie is a single all-zero root record. Decoding is
//! strict: anything that could not have been produced by [`to_bytes`] is
//! rejected and nothing is returned.


use std::fs::File;
use std::io;
use std::path::Path;

use memmap2::Mmap;
use tracing::{debug, debug_span, warn};

use crate::atomic::write_atomic;
use crate::trie::{Node, Trie};

/// is_end + frequency + child_count.
const HEADER_SIZE: usize = 4 + 4 + 4;
/// char_code ahead of each child header.
const CHAR_SIZE: usize = 4;
/// Smallest possible child record: its code plus a bare header.
const MIN_CHILD_SIZE: usize = CHAR_SIZE + HEADER_SIZE;

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("truncated snapshot at byte {offset}")]
    Truncated { offset: usize },

    #[error("invalid end flag {value} at byte {offset}")]
    InvalidFlag { offset: usize, value: i32 },

    #[error("negative frequency {value} at byte {offset}")]
    NegativeFrequency { offset: usize, value: i32 },

    #[error("frequency {value} on a non-word node at byte {offset}")]
    StrayFrequency { offset: usize, value: i32 },

    #[error("negative child count {value} at byte {offset}")]
    NegativeChildCount { offset: usize, value: i32 },

    #[error("child count {count} at byte {offset} exceeds the remaining data")]
    ChildCountOverflow { offset: usize, count: usize },

    #[error("invalid character code {code:#x} at byte {offset}")]
    InvalidChar { offset: usize, code: u32 },

    #[error("duplicate child {ch:?} at byte {offset}")]
    DuplicateChild { offset: usize, ch: char },

    #[error("node at byte {offset} is neither a word end nor a prefix")]
    DanglingNode { offset: usize },

    #[error("nodes nested deeper than {max} at byte {offset}")]
    TooDeep { offset: usize, max: usize },

    #[error("{count} trailing bytes after the root node")]
    TrailingBytes { count: usize },

    #[error("{0} does not fit in a 32-bit field")]
    FieldOverflow(&'static str),
}

impl SnapshotError {
    /// The snapshot file does not exist (as opposed to being unreadable or corrupt).
    pub fn is_not_found(&self) -> bool {
        matches!(self, SnapshotError::Io(e) if e.kind() == io::ErrorKind::NotFound)
    }
}

/// Serialize the whole trie.
pub fn to_bytes(trie: &Trie) -> Result<Vec<u8>, SnapshotError> {
    let _span = debug_span!("snapshot_encode", words = trie.len()).entered();
    let mut buf = Vec::with_capacity(trie.node_count() * MIN_CHILD_SIZE);

    // Children are pushed in reverse so they pop in memory order.
    let mut stack: Vec<(Option<char>, &Node)> = vec![(None, trie.root())];
    while let Some((ch, node)) = stack.pop() {
        if let Some(ch) = ch {
            buf.extend_from_slice(&u32::from(ch).to_le_bytes());
        }
        write_header(&mut buf, node)?;
        stack.extend(node.children().rev().map(|(ch, child)| (Some(ch), child)));
    }

    debug!(bytes = buf.len());
    Ok(buf)
}

fn write_header(buf: &mut Vec<u8>, node: &Node) -> Result<(), SnapshotError> {
    let is_end = i32::from(node.is_terminal());
    let frequency =
        i32::try_from(node.frequency()).map_err(|_| SnapshotError::FieldOverflow("frequency"))?;
    let child_count = i32::try_from(node.child_count())
        .map_err(|_| SnapshotError::FieldOverflow("child count"))?;
    buf.extend_from_slice(&is_end.to_le_bytes());
    buf.extend_from_slice(&frequency.to_le_bytes());
    buf.extend_from_slice(&child_count.to_le_bytes());
    Ok(())
}

/// Rebuild a trie from snapshot bytes.
///
/// `max_word_len` bounds the nesting depth and becomes the returned trie's
/// word length limit.
pub fn from_bytes(data: &[u8], max_word_len: usize) -> Result<Trie, SnapshotError> {
    let _span = debug_span!("snapshot_decode", bytes = data.len()).entered();
    let mut reader = Reader { data, pos: 0 };
    let mut words = 0usize;

    let mut current = reader.read_frame('\0')?;
    if current.node.is_terminal() {
        // The engine has no empty word; older writers could still flag the root.
        warn!("snapshot root is marked as a word end, ignoring");
        current.node = Node::with_header(false, 0);
    }
    // Ancestors of `current`; its length is `current`'s depth.
    let mut stack: Vec<Frame> = Vec::new();

    loop {
        if current.remaining > 0 {
            current.remaining -= 1;
            let offset = reader.pos;
            if stack.len() + 1 > max_word_len {
                return Err(SnapshotError::TooDeep {
                    offset,
                    max: max_word_len,
                });
            }
            let ch = reader.read_char()?;
            if current.node.find_child(ch).is_some() {
                return Err(SnapshotError::DuplicateChild { offset, ch });
            }
            let child = reader.read_frame(ch)?;
            stack.push(std::mem::replace(&mut current, child));
            continue;
        }

        match stack.pop() {
            Some(mut parent) => {
                if current.node.is_prunable() {
                    return Err(SnapshotError::DanglingNode {
                        offset: current.offset,
                    });
                }
                if current.node.is_terminal() {
                    words += 1;
                }
                parent.node.attach_child(current.key, current.node);
                current = parent;
            }
            None => {
                let rest = data.len() - reader.pos;
                if rest > 0 {
                    return Err(SnapshotError::TrailingBytes { count: rest });
                }
                debug!(words);
                return Ok(Trie::from_root(current.node, max_word_len, words));
            }
        }
    }
}

/// A node whose children are still being read.
struct Frame {
    key: char,
    node: Node,
    remaining: usize,
    /// Byte offset of the node's header.
    offset: usize,
}

struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl Reader<'_> {
    fn read_u32(&mut self) -> Result<u32, SnapshotError> {
        let bytes: [u8; 4] = self
            .data
            .get(self.pos..self.pos + 4)
            .and_then(|b| b.try_into().ok())
            .ok_or(SnapshotError::Truncated { offset: self.pos })?;
        self.pos += 4;
        Ok(u32::from_le_bytes(bytes))
    }

    fn read_i32(&mut self) -> Result<i32, SnapshotError> {
        self.read_u32().map(|v| v as i32)
    }

    fn read_char(&mut self) -> Result<char, SnapshotError> {
        let offset = self.pos;
        let code = self.read_u32()?;
        char::from_u32(code).ok_or(SnapshotError::InvalidChar { offset, code })
    }

    fn read_frame(&mut self, key: char) -> Result<Frame, SnapshotError> {
        let offset = self.pos;
        let is_end = self.read_i32()?;
        let frequency = self.read_i32()?;
        let child_count = self.read_i32()?;

        let terminal = match is_end {
            0 => false,
            1 => true,
            value => return Err(SnapshotError::InvalidFlag { offset, value }),
        };
        if frequency < 0 {
            return Err(SnapshotError::NegativeFrequency {
                offset,
                value: frequency,
            });
        }
        if !terminal && frequency != 0 {
            return Err(SnapshotError::StrayFrequency {
                offset,
                value: frequency,
            });
        }
        let count = usize::try_from(child_count).map_err(|_| SnapshotError::NegativeChildCount {
            offset,
            value: child_count,
        })?;
        let rest = self.data.len() - self.pos;
        if count > rest / MIN_CHILD_SIZE {
            return Err(SnapshotError::ChildCountOverflow { offset, count });
        }

        Ok(Frame {
            key,
            node: Node::with_header(terminal, frequency as u32),
            remaining: count,
            offset,
        })
    }
}

/// Atomically write a snapshot of `trie` to `path`.
pub fn save(trie: &Trie, path: &Path) -> Result<(), SnapshotError> {
    let bytes = to_bytes(trie)?;
    write_atomic(path, &bytes)?;
    Ok(())
}

/// Open a snapshot file, using mmap to avoid reading it into a separate buffer.
pub fn open(path: &Path, max_word_len: usize) -> Result<Trie, SnapshotError> {
    let file = File::open(path)?;
    // SAFETY: The file is opened read-only and the mapping is immutable.
    // The Mmap is dropped after decoding completes below.
    let mmap = unsafe { Mmap::map(&file)? };
    from_bytes(&mmap, max_word_len)
}
