//! End-to-end seeding: source text to stored articles

use crate::config::SeedOptions;
use crate::error::{PagemarkError, Result};
use crate::outline::{build_tree, ObjectRef, OutlineSource};
use crate::page_labels::PageLabelTable;
use crate::resolver::PageRangeResolver;
use crate::store::{ArticleStore, NewArticle};
use tracing::info;

/// Summary of a seeding run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeedReport {
    /// Entries in the outline tree, root included
    pub entries: usize,
    /// Entries without a destination
    pub structural: usize,
    /// Entries skipped as front matter
    pub front_matter: usize,
    /// Articles to store, in outline order
    pub articles: Vec<NewArticle>,
}

/// Parse the outline and resolve page ranges without touching a store
pub fn plan(
    source: &OutlineSource,
    labels: &PageLabelTable,
    options: &SeedOptions,
) -> Result<SeedReport> {
    let index = source.parse(options.sentinel)?;
    let tree = build_tree(&index, &ObjectRef::new(&options.root))?;

    let mut entries = tree.flatten();
    let resolution = PageRangeResolver::new(labels, options.resolver).resolve(&mut entries)?;

    info!(
        "Outline has {} entries: {} articles, {} folders, {} front matter",
        entries.len(),
        resolution.articles.len(),
        resolution.structural,
        resolution.front_matter
    );

    Ok(SeedReport {
        entries: entries.len(),
        structural: resolution.structural,
        front_matter: resolution.front_matter,
        articles: resolution.articles,
    })
}

/// Plan and store the articles in a single transaction
///
/// A store that already holds articles is left untouched.
pub fn seed(
    store: &mut ArticleStore,
    source: &OutlineSource,
    labels: &PageLabelTable,
    options: &SeedOptions,
) -> Result<SeedReport> {
    let existing = store.progress()?.total;
    if existing > 0 {
        return Err(PagemarkError::AlreadySeeded {
            path: store.get_path().to_string(),
            count: existing,
        });
    }

    let report = plan(source, labels, options)?;
    let inserted = store.insert_articles(&report.articles)?;
    info!("Stored {} articles in {}", inserted, store.get_path());
    Ok(report)
}
