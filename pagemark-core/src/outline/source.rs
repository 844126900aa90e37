//! Raw object text of the source document

use super::{ObjectRef, OutlineEntry, OutlineIndex, ParseResult};
use regex::Regex;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::OnceLock;
use tracing::debug;

const OBJECT_TERMINATOR: &str = "\nendobj\n";
const OBJECT_HEADER: &str = r"(?m)^\s*\d+\s+\d+\s+obj\b";

fn object_header() -> ParseResult<&'static Regex> {
    static HEADER: OnceLock<Regex> = OnceLock::new();
    if let Some(header) = HEADER.get() {
        return Ok(header);
    }
    let header = Regex::new(OBJECT_HEADER)?;
    Ok(HEADER.get_or_init(|| header))
}

/// Text of a PDF file, decoded for object scanning
#[derive(Debug, Clone)]
pub struct OutlineSource {
    text: String,
}

impl OutlineSource {
    /// Read a document from disk
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let bytes = fs::read(path)?;
        Ok(Self::from_bytes(&bytes))
    }

    /// Decode raw bytes, dropping sequences that are not valid UTF-8
    ///
    /// Stream contents are binary; only the dictionary text matters here.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut text = String::with_capacity(bytes.len());
        for chunk in bytes.utf8_chunks() {
            text.push_str(chunk.valid());
        }
        Self::from_text(text)
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Object blocks in file order, starting at the first object header
    pub fn blocks(&self) -> ParseResult<impl Iterator<Item = &str>> {
        let text = self.text.trim();
        let start = object_header()?.find(text).map_or(text.len(), |m| m.start());
        Ok(text[start..]
            .split(OBJECT_TERMINATOR)
            .map(|block| {
                let block = block.trim_start();
                block.strip_suffix("\nendobj").unwrap_or(block)
            })
            .filter(|block| !block.is_empty()))
    }

    /// Parse every outline object up to the sentinel object
    ///
    /// Reading stops at the block whose object number equals `sentinel`; the
    /// sentinel block itself is not parsed. Blocks that do not start with an
    /// object header (trailers, xref sections) are skipped.
    pub fn parse(&self, sentinel: Option<u32>) -> ParseResult<OutlineIndex> {
        let mut index = OutlineIndex::new();
        let object_header = object_header()?;

        for block in self.blocks()? {
            let header = block.lines().next().unwrap_or_default();
            if !object_header.is_match(header) {
                debug!("Skipping non-object block starting with {:?}", header);
                continue;
            }

            if sentinel.is_some() && ObjectRef::new(header).number() == sentinel {
                debug!("Reached sentinel object {}", header.trim());
                break;
            }

            index.insert(OutlineEntry::parse_from_raw(block)?);
        }

        debug!("Parsed {} outline objects", index.len());
        Ok(index)
    }
}
