//! Page-range resolution for outline entries
//!
//! An entry starts on the page its destination label sits on. It runs until
//! the page before the next page whose leading label number is at or below the
//! filler threshold, or until the page bound is reached.

use crate::error::{PagemarkError, Result};
use crate::outline::{ObjectRef, OutlineEntry};
use crate::page_labels::PageLabelTable;
use crate::store::NewArticle;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Thresholds used by [`PageRangeResolver`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverOptions {
    /// Entries starting before this page are front matter and are not stored
    pub toc_threshold: u32,
    /// Pages whose leading label number exceeds this continue the current article
    pub filler_threshold: i64,
    /// Last page the scan may reach; defaults to the length of the label table
    pub max_page: Option<u32>,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            toc_threshold: 21,
            filler_threshold: 1160,
            max_page: None,
        }
    }
}

impl ResolverOptions {
    pub fn with_toc_threshold(mut self, page: u32) -> Self {
        self.toc_threshold = page;
        self
    }

    pub fn with_filler_threshold(mut self, threshold: i64) -> Self {
        self.filler_threshold = threshold;
        self
    }

    pub fn with_max_page(mut self, page: u32) -> Self {
        self.max_page = Some(page);
        self
    }
}

/// Outcome of resolving a flattened outline
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    /// Rows to store, in outline order
    pub articles: Vec<NewArticle>,
    /// Entries without a destination
    pub structural: usize,
    /// Entries starting before the TOC threshold
    pub front_matter: usize,
}

/// Maps outline destinations to page ranges
pub struct PageRangeResolver<'a> {
    table: &'a PageLabelTable,
    options: ResolverOptions,
}

impl<'a> PageRangeResolver<'a> {
    pub fn new(table: &'a PageLabelTable, options: ResolverOptions) -> Self {
        Self { table, options }
    }

    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    fn max_page(&self) -> u32 {
        self.options.max_page.unwrap_or_else(|| self.table.len())
    }

    /// Page on which a destination starts
    pub fn start_page(&self, destination: &ObjectRef) -> Result<u32> {
        self.table
            .position_of(destination.as_str())
            .ok_or_else(|| PagemarkError::UnknownDestination(destination.to_string()))
    }

    /// Last page of the article starting at `start`
    ///
    /// When the scan stops because it reached the page bound, the bound page
    /// itself is not counted even if it continues the article.
    pub fn end_page(&self, start: u32) -> Result<u32> {
        let max_page = self.max_page();
        let filler = self.options.filler_threshold;

        let mut cursor = start + 1;
        let mut number = self.table.leading_number(cursor)?;
        while number > filler && cursor < max_page {
            cursor += 1;
            number = self.table.leading_number(cursor)?;
        }

        if number > filler {
            warn!(
                "Page scan from {} stopped at page bound {}; page {} is not counted",
                start, max_page, cursor
            );
        }

        Ok(cursor - 1)
    }

    /// Assign start and end pages to an entry
    ///
    /// Returns `false` for entries without a destination, which are left
    /// unresolved.
    pub fn resolve_entry(&self, entry: &mut OutlineEntry) -> Result<bool> {
        let Some(destination) = &entry.destination else {
            return Ok(false);
        };

        let start = self.start_page(destination)?;
        let end = self.end_page(start)?;
        entry.start_page = start;
        entry.end_page = end;

        debug!("{:?} resolved to pages {}-{}", entry.title, start, end);
        Ok(true)
    }

    /// Resolve every entry and collect the articles worth storing
    pub fn resolve(&self, entries: &mut [OutlineEntry]) -> Result<Resolution> {
        let mut resolution = Resolution::default();

        for entry in entries.iter_mut() {
            if !self.resolve_entry(entry)? {
                resolution.structural += 1;
                continue;
            }

            if entry.start_page < self.options.toc_threshold {
                debug!("Skipping front matter entry {:?}", entry.title);
                resolution.front_matter += 1;
                continue;
            }

            resolution.articles.push(NewArticle {
                title: entry.title.clone(),
                start_page: entry.start_page,
                end_page: entry.end_page,
            });
        }

        Ok(resolution)
    }
}
