//! Seeding configuration

use crate::error::Result;
use crate::resolver::ResolverOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Options for a seeding run
///
/// Every field has a default, so a JSON configuration file only needs the
/// keys it changes:
///
/// ```json
/// { "sentinel": 1160, "resolver": { "toc_threshold": 21, "max_page": 1929 } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedOptions {
    /// Reference of the outline root object
    pub root: String,
    /// Object number at which reading the source stops
    pub sentinel: Option<u32>,
    /// Page-range thresholds
    pub resolver: ResolverOptions,
}

impl Default for SeedOptions {
    fn default() -> Self {
        Self {
            root: "1 0 R".to_string(),
            sentinel: Some(1160),
            resolver: ResolverOptions::default(),
        }
    }
}

impl SeedOptions {
    /// Load options from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn with_root(mut self, root: impl Into<String>) -> Self {
        self.root = root.into();
        self
    }

    pub fn with_sentinel(mut self, sentinel: Option<u32>) -> Self {
        self.sentinel = sentinel;
        self
    }

    pub fn with_resolver(mut self, resolver: ResolverOptions) -> Self {
        self.resolver = resolver;
        self
    }
}
