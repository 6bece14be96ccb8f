//! Plain text rendering of the element stream.

use crate::model::{Document, Element};

/// Convert a document to plain text.
///
/// Each element becomes one or more lines; spacers become blank lines
/// and images are omitted (their caption still appears).
pub fn to_text(doc: &Document) -> String {
    let mut lines: Vec<String> = Vec::with_capacity(doc.len());
    for element in &doc.elements {
        match element {
            Element::Image(_) => {}
            Element::Spacer => lines.push(String::new()),
            other => lines.push(other.plain_text()),
        }
    }
    lines.join("\n")
}
