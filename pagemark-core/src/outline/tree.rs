//! Outline tree reconstruction and traversal

use super::{ObjectRef, OutlineEntry, OutlineIndex, ParseError, ParseResult};
use std::collections::HashSet;

/// Outline tree node
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineNode {
    /// Item stored in this node
    pub entry: OutlineEntry,
    /// Child nodes in the order they appear in the outline
    pub children: Vec<OutlineNode>,
}

impl OutlineNode {
    pub fn new(entry: OutlineEntry, children: Vec<OutlineNode>) -> Self {
        Self { entry, children }
    }

    /// Count nodes in subtree, including self
    pub fn count_all(&self) -> usize {
        self.iter().count()
    }

    /// Pre-order traversal (node, then each child in order)
    pub fn iter(&self) -> OutlineIter<'_> {
        OutlineIter { stack: vec![self] }
    }

    /// Collect the pre-order traversal into owned entries
    pub fn flatten(&self) -> Vec<OutlineEntry> {
        self.iter().cloned().collect()
    }
}

/// Lazy pre-order iterator over an outline tree
pub struct OutlineIter<'a> {
    stack: Vec<&'a OutlineNode>,
}

impl<'a> Iterator for OutlineIter<'a> {
    type Item = &'a OutlineEntry;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(&node.entry)
    }
}

impl<'a> IntoIterator for &'a OutlineNode {
    type Item = &'a OutlineEntry;
    type IntoIter = OutlineIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Deepest nesting level accepted below the root
pub const MAX_OUTLINE_DEPTH: u32 = 256;

/// Build the outline tree rooted at `root`
///
/// Children of an item are collected by walking its `/First` child along the
/// `/Next` chain up to and including its `/Last` child. Every entry may be
/// placed once; meeting it again means the sibling chain loops. Items nested
/// deeper than [`MAX_OUTLINE_DEPTH`] are rejected.
pub fn build_tree(index: &OutlineIndex, root: &ObjectRef) -> ParseResult<OutlineNode> {
    let root = index.require(root)?;
    let mut placed = HashSet::new();

    let mut current = Frame::open(index, root, 0, &mut placed)?;
    let mut ancestors = Vec::new();
    loop {
        if let Some(child) = current.pending.take() {
            let child = Frame::open(index, child, current.depth + 1, &mut placed)?;
            ancestors.push(std::mem::replace(&mut current, child));
            continue;
        }

        let node = current.finish();
        match ancestors.pop() {
            Some(parent) => {
                current = parent;
                current.adopt(index, node)?;
            }
            None => return Ok(node),
        }
    }
}

/// An item whose children are still being collected
struct Frame<'a> {
    entry: &'a OutlineEntry,
    depth: u32,
    last: Option<&'a OutlineEntry>,
    pending: Option<&'a OutlineEntry>,
    children: Vec<OutlineNode>,
}

impl<'a> Frame<'a> {
    fn open(
        index: &'a OutlineIndex,
        entry: &'a OutlineEntry,
        depth: u32,
        placed: &mut HashSet<ObjectRef>,
    ) -> ParseResult<Self> {
        if !placed.insert(entry.id.clone()) {
            return Err(ParseError::CircularReference(entry.id.to_string()));
        }
        if depth > MAX_OUTLINE_DEPTH {
            return Err(ParseError::MaxDepthExceeded {
                object: entry.id.to_string(),
                limit: MAX_OUTLINE_DEPTH,
            });
        }
        if depth > 0 {
            check_links(index, entry)?;
        }

        let (pending, last) = if entry.count != 0 {
            let first = child_link(index, entry, entry.first.as_ref(), "/First")?;
            let last = child_link(index, entry, entry.last.as_ref(), "/Last")?;
            (Some(first), Some(last))
        } else {
            (None, None)
        };

        Ok(Self {
            entry,
            depth,
            last,
            pending,
            children: Vec::new(),
        })
    }

    /// Append a finished child and queue its next sibling
    fn adopt(&mut self, index: &'a OutlineIndex, child: OutlineNode) -> ParseResult<()> {
        if let Some(last) = self.last.filter(|last| last.id != child.entry.id) {
            let next = child
                .entry
                .next
                .as_ref()
                .ok_or_else(|| ParseError::UnterminatedSiblings {
                    parent: self.entry.id.to_string(),
                    last: last.id.to_string(),
                })?;
            self.pending = Some(index.require(next)?);
        }
        self.children.push(child);
        Ok(())
    }

    fn finish(self) -> OutlineNode {
        let mut entry = self.entry.clone();
        entry.depth = self.depth;
        OutlineNode::new(entry, self.children)
    }
}

fn child_link<'a>(
    index: &'a OutlineIndex,
    entry: &OutlineEntry,
    link: Option<&ObjectRef>,
    key: &str,
) -> ParseResult<&'a OutlineEntry> {
    match link {
        Some(id) => index.require(id),
        None => Err(ParseError::MissingKey(format!("{} of {}", key, entry.id))),
    }
}

// Parent and sibling links of a placed item must resolve.
fn check_links(index: &OutlineIndex, entry: &OutlineEntry) -> ParseResult<()> {
    for link in [&entry.parent, &entry.prev, &entry.next].into_iter().flatten() {
        index.require(link)?;
    }
    Ok(())
}
