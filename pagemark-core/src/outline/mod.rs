//! Document outline (bookmarks) recovered from the raw object text of a PDF
//!
//! The outline is read from a text serialization of the document's objects,
//! one `N G obj ... endobj` block per outline item. Blocks are decoded into
//! [`OutlineEntry`] records, linked into an [`OutlineNode`] tree by their
//! `/First`, `/Next` and `/Last` references and flattened in reading order.

mod entry;
mod index;
mod reference;
mod source;
mod tree;

pub use self::entry::OutlineEntry;
pub use self::index::OutlineIndex;
pub use self::reference::ObjectRef;
pub use self::source::OutlineSource;
pub use self::tree::{build_tree, OutlineIter, OutlineNode, MAX_OUTLINE_DEPTH};

/// Result type for outline operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Outline parser errors
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Object block has no identity line")]
    MissingIdentity,

    #[error("Field {field} in object {object} has no terminating delimiter")]
    MissingDelimiter { field: &'static str, object: String },

    #[error("Invalid /Count value in object {object}: {value:?}")]
    InvalidCount { object: String, value: String },

    #[error("Missing outline object: {0}")]
    MissingKey(String),

    #[error("Sibling chain under {parent} never reaches its last child {last}")]
    UnterminatedSiblings { parent: String, last: String },

    #[error("Circular reference detected at {0}")]
    CircularReference(String),

    #[error("Invalid object header pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Outline item {object} is nested deeper than {limit} levels")]
    MaxDepthExceeded { object: String, limit: u32 },
}
