//! Document-level types.

use super::{Element, ElementKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A parsed report: metadata plus the ordered output elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Document metadata (title, author, etc.)
    pub metadata: Metadata,

    /// Output elements in source order
    pub elements: Vec<Element>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self {
            metadata: Metadata::default(),
            elements: Vec::new(),
        }
    }

    /// Create a document from an element sequence.
    pub fn from_elements(elements: Vec<Element>) -> Self {
        Self {
            metadata: Metadata::default(),
            elements,
        }
    }

    /// Append an element.
    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// Get the number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Check if the document has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Count elements of a given kind.
    pub fn count(&self, kind: ElementKind) -> usize {
        self.elements.iter().filter(|e| e.kind() == kind).count()
    }

    /// Text of the first level-1 heading, if any.
    pub fn first_title(&self) -> Option<&str> {
        self.elements.iter().find_map(|e| match e {
            Element::Heading { level: 1, text } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Fill in the title from the first level-1 heading when unset.
    pub fn infer_title(&mut self) {
        if self.metadata.title.is_none() {
            self.metadata.title = self.first_title().map(str::to_string);
        }
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.elements
            .iter()
            .map(Element::plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Document metadata written to the PDF info dictionary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title
    pub title: Option<String>,

    /// Document author
    pub author: Option<String>,

    /// Document subject
    pub subject: Option<String>,

    /// Keywords
    pub keywords: Option<String>,

    /// Creator application
    pub creator: Option<String>,

    /// Producing library; the PDF writer fills in its own name when unset
    pub producer: Option<String>,

    /// Markdown file the document was parsed from
    pub source: Option<PathBuf>,

    /// Creation date
    pub created: Option<DateTime<Utc>>,
}

impl Metadata {
    /// Create metadata with a title.
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    /// Stamp the creation date with the current time.
    pub fn stamp_now(&mut self) {
        self.created = Some(Utc::now());
    }
}
