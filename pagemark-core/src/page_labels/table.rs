use crate::error::{PagemarkError, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Ordered page labels, addressed by 1-based physical page number
#[derive(Debug, Clone, Default)]
pub struct PageLabelTable {
    labels: Vec<String>,
    positions: HashMap<String, u32>,
}

impl PageLabelTable {
    /// Load a label file, one label per line
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(Self::from_text(&text))
    }

    pub fn from_text(text: &str) -> Self {
        let text = text.trim();
        if text.is_empty() {
            return Self::default();
        }
        Self::from_labels(text.lines())
    }

    /// Build a table from labels in page order
    ///
    /// Runs of whitespace inside a label collapse to one space, the same way
    /// outline references are normalized. When a label repeats, lookups
    /// return its last position.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let labels: Vec<String> = labels
            .into_iter()
            .map(|label| normalize(label.as_ref()))
            .collect();
        let positions = labels
            .iter()
            .enumerate()
            .map(|(i, label)| (label.clone(), i as u32 + 1))
            .collect();
        Self { labels, positions }
    }

    /// Number of pages
    pub fn len(&self) -> u32 {
        self.labels.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Label of a page
    pub fn label(&self, position: u32) -> Option<&str> {
        let index = position.checked_sub(1)? as usize;
        self.labels.get(index).map(String::as_str)
    }

    /// Page carrying `label`
    pub fn position_of(&self, label: &str) -> Option<u32> {
        self.positions.get(&normalize(label)).copied()
    }

    /// Leading numeric token of a page's label
    pub fn leading_number(&self, position: u32) -> Result<i64> {
        let label = self
            .label(position)
            .ok_or(PagemarkError::PageOutOfRange {
                position,
                len: self.len(),
            })?;

        label
            .split(' ')
            .next()
            .and_then(|token| token.parse().ok())
            .ok_or_else(|| PagemarkError::InvalidPageLabel {
                position,
                label: label.to_string(),
            })
    }
}

fn normalize(label: &str) -> String {
    label.split_whitespace().collect::<Vec<_>>().join(" ")
}
