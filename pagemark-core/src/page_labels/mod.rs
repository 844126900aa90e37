//! Page label table mapping physical pages to their labels
//!
//! The table is a plain text file with one label per line, in physical page
//! order. Outline destinations are looked up in it to find the page an item
//! starts on, and the numeric part of each label drives the filler-page scan.

mod table;

pub use table::PageLabelTable;
