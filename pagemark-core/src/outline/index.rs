use super::{ObjectRef, OutlineEntry, ParseError, ParseResult};
use std::collections::HashMap;

/// Outline entries keyed by object reference
#[derive(Debug, Clone, Default)]
pub struct OutlineIndex {
    entries: HashMap<ObjectRef, OutlineEntry>,
}

impl OutlineIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry, replacing any earlier entry with the same reference
    pub fn insert(&mut self, entry: OutlineEntry) {
        self.entries.insert(entry.id.clone(), entry);
    }

    pub fn get(&self, id: &ObjectRef) -> Option<&OutlineEntry> {
        self.entries.get(id)
    }

    /// Look up a reference that must resolve
    pub fn require(&self, id: &ObjectRef) -> ParseResult<&OutlineEntry> {
        self.entries
            .get(id)
            .ok_or_else(|| ParseError::MissingKey(id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<OutlineEntry> for OutlineIndex {
    fn from_iter<I: IntoIterator<Item = OutlineEntry>>(iter: I) -> Self {
        let mut index = Self::new();
        for entry in iter {
            index.insert(entry);
        }
        index
    }
}
