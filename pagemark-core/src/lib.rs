//! # pagemark
//!
//! Split a large reference PDF into per-topic articles and keep track of which
//! ones have been read.
//!
//! ## Features
//!
//! - **Outline Parsing**: Decode outline (bookmark) objects from the raw text of a PDF
//! - **Tree Reconstruction**: Rebuild the bookmark hierarchy from `/First`, `/Next` and `/Last` links
//! - **Page Ranges**: Resolve every bookmark to the physical pages of its article
//! - **Reading List**: Store articles in SQLite and track their read state
//!
//! ## Quick Start
//!
//! ```rust
//! use pagemark::{seed, ArticleStore, OutlineSource, PageLabelTable, ResolverOptions, SeedOptions};
//!
//! # fn main() -> pagemark::Result<()> {
//! let source = OutlineSource::from_text(
//!     "1 0 obj\n<</Type/Outlines/First 2 0 R/Last 2 0 R/Count 1>>\nendobj\n\
//!      2 0 obj\n<</Title(Types)/Parent 1 0 R/Dest[12 0 R/Fit]>>\nendobj\n",
//! );
//! let labels = PageLabelTable::from_labels(["10 0 R", "12 0 R", "1200 0 R", "13 0 R"]);
//! let options = SeedOptions::default()
//!     .with_resolver(ResolverOptions::default().with_toc_threshold(1));
//!
//! let mut store = ArticleStore::in_memory()?;
//! let report = seed::seed(&mut store, &source, &labels, &options)?;
//!
//! assert_eq!(report.articles.len(), 1);
//! let next = store.next_unread()?.unwrap();
//! assert_eq!((next.start_page, next.end_page), (2, 3));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod outline;
pub mod page_labels;
pub mod resolver;
pub mod seed;
pub mod store;

pub use config::SeedOptions;
pub use error::{PagemarkError, Result};
pub use outline::{build_tree, ObjectRef, OutlineEntry, OutlineIndex, OutlineNode, OutlineSource, ParseError};
pub use page_labels::PageLabelTable;
pub use resolver::{PageRangeResolver, Resolution, ResolverOptions};
pub use seed::SeedReport;
pub use store::{Article, ArticleStore, NewArticle, Progress};
