//! Output elements produced by the parser.

use super::ImageRef;
use serde::{Deserialize, Serialize};

/// One structured unit of the rendered document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Element {
    /// A heading. Levels above 3 are laid out with body styling.
    Heading {
        /// Number of leading `#` characters
        level: u8,
        /// Heading text without the marker
        text: String,
    },

    /// A plain paragraph
    Paragraph {
        /// Full line text
        text: String,
    },

    /// A run of bullet items
    BulletList {
        /// Item texts with the `- ` marker stripped
        items: Vec<String>,
    },

    /// Fenced code, kept verbatim
    CodeBlock {
        /// Interior lines joined by `\n`
        text: String,
    },

    /// An embedded image
    Image(ImageRef),

    /// Italic caption following an image
    Caption {
        /// Caption text (the image alt text)
        text: String,
    },

    /// Vertical gap produced by a blank line
    Spacer,
}

impl Element {
    /// Create a heading element.
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Element::Heading {
            level,
            text: text.into(),
        }
    }

    /// Create a paragraph element.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Element::Paragraph { text: text.into() }
    }

    /// Create a bullet list element.
    pub fn bullet_list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Element::BulletList {
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a code block from its lines.
    pub fn code_block<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let text = lines
            .into_iter()
            .map(|l| l.as_ref().to_string())
            .collect::<Vec<_>>()
            .join("\n");
        Element::CodeBlock { text }
    }

    /// Create a caption element.
    pub fn caption(text: impl Into<String>) -> Self {
        Element::Caption { text: text.into() }
    }

    /// Get the kind of this element.
    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Heading { .. } => ElementKind::Heading,
            Element::Paragraph { .. } => ElementKind::Paragraph,
            Element::BulletList { .. } => ElementKind::BulletList,
            Element::CodeBlock { .. } => ElementKind::CodeBlock,
            Element::Image(_) => ElementKind::Image,
            Element::Caption { .. } => ElementKind::Caption,
            Element::Spacer => ElementKind::Spacer,
        }
    }

    /// Check if this element is a heading.
    pub fn is_heading(&self) -> bool {
        matches!(self, Element::Heading { .. })
    }

    /// Check if this element is a spacer.
    pub fn is_spacer(&self) -> bool {
        matches!(self, Element::Spacer)
    }

    /// Get plain text content of the element.
    ///
    /// Images yield nothing; their alt text travels in the following caption.
    pub fn plain_text(&self) -> String {
        match self {
            Element::Heading { text, .. }
            | Element::Paragraph { text }
            | Element::CodeBlock { text }
            | Element::Caption { text } => text.clone(),
            Element::BulletList { items } => items
                .iter()
                .map(|item| format!("- {}", item))
                .collect::<Vec<_>>()
                .join("\n"),
            Element::Image(_) | Element::Spacer => String::new(),
        }
    }
}

/// Discriminant of [`Element`], handy for counting and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    /// Heading
    Heading,
    /// Paragraph
    Paragraph,
    /// Bullet list
    BulletList,
    /// Code block
    CodeBlock,
    /// Image
    Image,
    /// Caption
    Caption,
    /// Spacer
    Spacer,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_block_joins_lines() {
        let code = Element::code_block(["x=1", "y=2"]);
        assert_eq!(
            code,
            Element::CodeBlock {
                text: "x=1\ny=2".to_string()
            }
        );
    }

    #[test]
    fn test_bullet_list_plain_text() {
        let list = Element::bullet_list(["a", "b"]);
        assert_eq!(list.plain_text(), "- a\n- b");
        assert_eq!(list.kind(), ElementKind::BulletList);
    }

    #[test]
    fn test_serde_tag() {
        let json = serde_json::to_string(&Element::heading(2, "Scope")).unwrap();
        assert_eq!(json, r#"{"type":"heading","level":2,"text":"Scope"}"#);

        let spacer = serde_json::to_string(&Element::Spacer).unwrap();
        assert_eq!(spacer, r#"{"type":"spacer"}"#);
    }
}
