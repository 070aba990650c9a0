/// Frequencies saturate here so they always fit the snapshot's signed field.
pub const MAX_FREQUENCY: u32 = i32::MAX as u32;

/// One position in the folded character space.
///
/// A node owns its children by value. Child keys are unique and kept in
/// insertion order; nothing depends on that order, readers sort on demand.
#[derive(Debug, Default)]
pub struct Node {
    terminal: bool,
    frequency: u32,
    children: Vec<(char, Node)>,
}

impl Node {
    pub fn new() -> Self {
        Self::default()
    }

    /// Node with its header fields set and no children (used by the decoder).
    pub(crate) fn with_header(terminal: bool, frequency: u32) -> Self {
        Self {
            terminal,
            frequency: if terminal { frequency } else { 0 },
            children: Vec::new(),
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// Usage count; always 0 for non-terminal nodes.
    pub fn frequency(&self) -> u32 {
        self.frequency
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn children(&self) -> impl DoubleEndedIterator<Item = (char, &Node)> + ExactSizeIterator {
        self.children.iter().map(|(ch, node)| (*ch, node))
    }

    pub(crate) fn edges(&self) -> &[(char, Node)] {
        &self.children
    }

    /// Non-terminal and childless: nothing below or at this node is a word.
    pub fn is_prunable(&self) -> bool {
        !self.terminal && self.children.is_empty()
    }

    pub fn find_child(&self, ch: char) -> Option<&Node> {
        self.children
            .iter()
            .find(|(c, _)| *c == ch)
            .map(|(_, node)| node)
    }

    pub fn find_child_mut(&mut self, ch: char) -> Option<&mut Node> {
        self.children
            .iter_mut()
            .find(|(c, _)| *c == ch)
            .map(|(_, node)| node)
    }

    /// Returns the child under `ch`, creating an empty one if absent.
    pub fn add_child(&mut self, ch: char) -> &mut Node {
        let idx = match self.children.iter().position(|(c, _)| *c == ch) {
            Some(idx) => idx,
            None => {
                self.children.push((ch, Node::new()));
                self.children.len() - 1
            }
        };
        &mut self.children[idx].1
    }

    /// Attach an already-built subtree. The caller guarantees `ch` is new.
    pub(crate) fn attach_child(&mut self, ch: char, child: Node) {
        debug_assert!(self.find_child(ch).is_none(), "duplicate child {ch:?}");
        self.children.push((ch, child));
    }

    /// Detach the subtree under `ch`, dropping it with the returned value.
    pub fn remove_child(&mut self, ch: char) -> Option<Node> {
        let idx = self.children.iter().position(|(c, _)| *c == ch)?;
        Some(self.children.remove(idx).1)
    }

    /// Mark as a word end and count one use. Returns the new frequency.
    pub(crate) fn record_use(&mut self) -> u32 {
        self.terminal = true;
        self.frequency = self.frequency.saturating_add(1).min(MAX_FREQUENCY);
        self.frequency
    }

    pub(crate) fn clear_terminal(&mut self) {
        self.terminal = false;
        self.frequency = 0;
    }
}

impl Drop for Node {
    // Chains can be as deep as the longest word; tear them down from a heap
    // stack instead of one native frame per level.
    fn drop(&mut self) {
        let mut pending: Vec<Node> = self.children.drain(..).map(|(_, n)| n).collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.children.drain(..).map(|(_, child)| child));
        }
    }
}
