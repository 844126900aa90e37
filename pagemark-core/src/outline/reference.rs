use serde::{Deserialize, Serialize};
use std::fmt;

/// Reference to a PDF object in canonical `N G R` form
///
/// Object headers (`12 0 obj`) and references (`12 0 R`) name the same object;
/// both normalize to the reference form so they can be used as map keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectRef(String);

impl ObjectRef {
    /// Normalize raw reference text
    pub fn new(raw: &str) -> Self {
        let normalized = raw
            .split_whitespace()
            .map(|token| if token == "obj" { "R" } else { token })
            .collect::<Vec<_>>()
            .join(" ");
        Self(normalized)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Object number (the leading token), if numeric
    pub fn number(&self) -> Option<u32> {
        self.0.split(' ').next()?.parse().ok()
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ObjectRef {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}
