//! Outline item records decoded from raw object text

use super::{ObjectRef, ParseError, ParseResult};
use serde::Serialize;
use std::fmt;

/// Outline item (bookmark) as it appears in the source document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlineEntry {
    /// Object reference of the item itself
    pub id: ObjectRef,
    /// Item title
    pub title: String,
    /// Parent item
    pub parent: Option<ObjectRef>,
    /// Previous sibling
    pub prev: Option<ObjectRef>,
    /// Next sibling
    pub next: Option<ObjectRef>,
    /// First child
    pub first: Option<ObjectRef>,
    /// Last child
    pub last: Option<ObjectRef>,
    /// Declared descendant count (negative when the item is closed)
    pub count: i64,
    /// Page the item links to, absent for folder headings
    pub destination: Option<ObjectRef>,
    /// Depth in the outline tree, root = 0
    pub depth: u32,
    /// First page of the linked article, 0 until resolved
    pub start_page: u32,
    /// Last page of the linked article, 0 until resolved
    pub end_page: u32,
}

impl OutlineEntry {
    /// Create an entry with no links, title or destination
    pub fn new(id: impl Into<ObjectRef>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            parent: None,
            prev: None,
            next: None,
            first: None,
            last: None,
            count: 0,
            destination: None,
            depth: 0,
            start_page: 0,
            end_page: 0,
        }
    }

    /// Set title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set destination
    pub fn with_destination(mut self, destination: impl Into<ObjectRef>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    /// Set first and last child and the declared count
    pub fn with_children(
        mut self,
        first: impl Into<ObjectRef>,
        last: impl Into<ObjectRef>,
        count: i64,
    ) -> Self {
        self.first = Some(first.into());
        self.last = Some(last.into());
        self.count = count;
        self
    }

    /// Set parent and siblings
    pub fn with_links(
        mut self,
        parent: Option<&str>,
        prev: Option<&str>,
        next: Option<&str>,
    ) -> Self {
        self.parent = parent.map(ObjectRef::new);
        self.prev = prev.map(ObjectRef::new);
        self.next = next.map(ObjectRef::new);
        self
    }

    /// Whether the item links to a page
    pub fn has_destination(&self) -> bool {
        self.destination.is_some()
    }

    /// Parse an outline item from the text of one object block
    ///
    /// The first line holds the object header; every other field is optional
    /// and may appear in any order. A field whose marker is present but whose
    /// value is not terminated is a malformed document.
    pub fn parse_from_raw(raw: &str) -> ParseResult<Self> {
        let header_end = raw.find('\n').ok_or(ParseError::MissingIdentity)?;
        let id = ObjectRef::new(&raw[..header_end]);
        if id.as_str().is_empty() {
            return Err(ParseError::MissingIdentity);
        }

        let fields = FieldScanner {
            raw,
            object: id.as_str(),
        };
        let mut entry = Self::new(id.clone());

        if let Some(title) = fields.value("Title", "/Title", "/Title(", &['/'], false)? {
            // Drop the closing parenthesis of the string literal
            let title = title.trim_end();
            let title = title.strip_suffix(')').unwrap_or(title);
            entry.title = title.replace("\\(", "(").replace("\\)", ")");
        }

        entry.parent = fields.reference("Parent", "/Parent")?;
        entry.prev = fields.reference("Prev", "/Prev")?;
        entry.next = fields.reference("Next", "/Next")?;
        entry.first = fields.reference("First", "/First")?;
        entry.last = fields.reference("Last", "/Last")?;

        // /Count is often the last key, in which case the dictionary close ends it
        if let Some(count) = fields.value("Count", "/Count", "/Count", &['/', '>'], true)? {
            let count = count.trim();
            entry.count = count.parse().map_err(|_| ParseError::InvalidCount {
                object: id.to_string(),
                value: count.to_string(),
            })?;
        }

        entry.destination = fields
            .value("Dest", "/Dest", "/Dest[", &['/'], true)?
            .and_then(non_empty_reference);

        Ok(entry)
    }
}

impl fmt::Display for OutlineEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let indent = " ".repeat(self.depth as usize);
        match &self.destination {
            Some(destination) => write!(f, "{}{} - {}", indent, self.title, destination),
            None => write!(f, "{}{} - ", indent, self.title),
        }
    }
}

struct FieldScanner<'a> {
    raw: &'a str,
    object: &'a str,
}

impl<'a> FieldScanner<'a> {
    /// Text following `value_marker` up to the first terminator found
    ///
    /// Terminators are tried in order, so a later one only applies when no
    /// earlier one occurs anywhere after the marker.
    fn value(
        &self,
        field: &'static str,
        marker: &str,
        value_marker: &str,
        terminators: &[char],
        skip_whitespace: bool,
    ) -> ParseResult<Option<&'a str>> {
        if !self.raw.contains(marker) {
            return Ok(None);
        }

        let malformed = || ParseError::MissingDelimiter {
            field,
            object: self.object.to_string(),
        };

        let start = self.raw.find(value_marker).ok_or_else(malformed)? + value_marker.len();
        let mut rest = &self.raw[start..];
        if skip_whitespace {
            rest = rest.trim_start();
        }

        terminators
            .iter()
            .find_map(|&terminator| rest.find(terminator))
            .map(|end| Some(&rest[..end]))
            .ok_or_else(malformed)
    }

    fn reference(&self, field: &'static str, marker: &str) -> ParseResult<Option<ObjectRef>> {
        Ok(self
            .value(field, marker, marker, &['/'], true)?
            .and_then(non_empty_reference))
    }
}

fn non_empty_reference(value: &str) -> Option<ObjectRef> {
    let reference = ObjectRef::new(value);
    (!reference.as_str().is_empty()).then_some(reference)
}
