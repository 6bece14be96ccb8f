//! Visitor pattern for customizing document layout.
//!
//! Layout consults a visitor for every element before placing it, so
//! callers can drop or substitute elements without touching the parser.
//!
//! # Example
//!
//! ```
//! use mdpdf::model::Element;
//! use mdpdf::render::visitor::{DocumentVisitor, VisitorAction};
//!
//! struct NoCode;
//!
//! impl DocumentVisitor for NoCode {
//!     fn visit_code_block(&mut self, _text: &str) -> VisitorAction {
//!         VisitorAction::Replace(Element::paragraph("[code omitted]"))
//!     }
//! }
//! ```

use crate::model::{Element, ImageRef};

/// Action returned by visitor methods to control layout.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum VisitorAction {
    /// Lay out the element unchanged.
    #[default]
    Continue,

    /// Lay out this element instead.
    Replace(Element),

    /// Skip this element entirely.
    Skip,
}

impl VisitorAction {
    /// Check if this action indicates the element should be skipped.
    pub fn should_skip(&self) -> bool {
        matches!(self, VisitorAction::Skip)
    }

    /// Check if this action provides a replacement element.
    pub fn is_replace(&self) -> bool {
        matches!(self, VisitorAction::Replace(_))
    }

    /// Get the replacement element if available.
    pub fn replacement(&self) -> Option<&Element> {
        match self {
            VisitorAction::Replace(e) => Some(e),
            _ => None,
        }
    }
}

/// Trait for visiting elements during layout.
///
/// All methods return `VisitorAction::Continue` by default.
pub trait DocumentVisitor {
    /// Called before laying out a heading.
    fn visit_heading(&mut self, level: u8, text: &str) -> VisitorAction {
        let _ = (level, text);
        VisitorAction::Continue
    }

    /// Called before laying out a paragraph.
    fn visit_paragraph(&mut self, text: &str) -> VisitorAction {
        let _ = text;
        VisitorAction::Continue
    }

    /// Called before laying out a bullet list.
    fn visit_bullet_list(&mut self, items: &[String]) -> VisitorAction {
        let _ = items;
        VisitorAction::Continue
    }

    /// Called before laying out a code block.
    fn visit_code_block(&mut self, text: &str) -> VisitorAction {
        let _ = text;
        VisitorAction::Continue
    }

    /// Called before laying out an image.
    fn visit_image(&mut self, image: &ImageRef) -> VisitorAction {
        let _ = image;
        VisitorAction::Continue
    }

    /// Called before laying out a caption.
    fn visit_caption(&mut self, text: &str) -> VisitorAction {
        let _ = text;
        VisitorAction::Continue
    }

    /// Called before laying out a spacer.
    fn visit_spacer(&mut self) -> VisitorAction {
        VisitorAction::Continue
    }

    /// Called when a new page starts.
    ///
    /// # Arguments
    /// * `page_number` - The 1-indexed page number
    fn on_page_start(&mut self, page_number: u32) {
        let _ = page_number;
    }

    /// Dispatch an element to the matching `visit_*` method.
    fn visit(&mut self, element: &Element) -> VisitorAction {
        match element {
            Element::Heading { level, text } => self.visit_heading(*level, text),
            Element::Paragraph { text } => self.visit_paragraph(text),
            Element::BulletList { items } => self.visit_bullet_list(items),
            Element::CodeBlock { text } => self.visit_code_block(text),
            Element::Image(image) => self.visit_image(image),
            Element::Caption { text } => self.visit_caption(text),
            Element::Spacer => self.visit_spacer(),
        }
    }
}

/// Default visitor that performs no customization.
#[derive(Debug, Clone, Default)]
pub struct DefaultVisitor;

impl DefaultVisitor {
    /// Create a new default visitor.
    pub fn new() -> Self {
        Self
    }
}

impl DocumentVisitor for DefaultVisitor {}

/// Visitor that skips all images and their captions.
#[derive(Debug, Clone, Default)]
pub struct SkipImagesVisitor;

impl DocumentVisitor for SkipImagesVisitor {
    fn visit_image(&mut self, _image: &ImageRef) -> VisitorAction {
        VisitorAction::Skip
    }

    fn visit_caption(&mut self, _text: &str) -> VisitorAction {
        VisitorAction::Skip
    }
}

/// Visitor that limits heading depth.
///
/// Headings between `max_level` and 3 are promoted to `max_level`.
/// Deeper headings already use body styling and are left alone.
#[derive(Debug, Clone)]
pub struct MaxHeadingDepthVisitor {
    max_level: u8,
}

impl MaxHeadingDepthVisitor {
    /// Create a visitor that caps headings at the specified level.
    pub fn new(max_level: u8) -> Self {
        Self {
            max_level: max_level.clamp(1, 3),
        }
    }
}

impl DocumentVisitor for MaxHeadingDepthVisitor {
    fn visit_heading(&mut self, level: u8, text: &str) -> VisitorAction {
        if level <= self.max_level || level > 3 {
            return VisitorAction::Continue;
        }
        VisitorAction::Replace(Element::heading(self.max_level, text))
    }
}

/// Composite visitor that chains multiple visitors.
///
/// Visitors are called in order. The first visitor that returns
/// a non-Continue action determines the result.
pub struct CompositeVisitor {
    visitors: Vec<Box<dyn DocumentVisitor>>,
}

impl CompositeVisitor {
    /// Create a new composite visitor.
    pub fn new() -> Self {
        Self {
            visitors: Vec::new(),
        }
    }

    /// Add a visitor to the chain.
    pub fn with_visitor<V: DocumentVisitor + 'static>(mut self, visitor: V) -> Self {
        self.visitors.push(Box::new(visitor));
        self
    }

    /// Number of chained visitors.
    pub fn len(&self) -> usize {
        self.visitors.len()
    }

    /// Check if the chain is empty.
    pub fn is_empty(&self) -> bool {
        self.visitors.is_empty()
    }
}

impl Default for CompositeVisitor {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentVisitor for CompositeVisitor {
    fn visit(&mut self, element: &Element) -> VisitorAction {
        for visitor in &mut self.visitors {
            let action = visitor.visit(element);
            if !matches!(action, VisitorAction::Continue) {
                return action;
            }
        }
        VisitorAction::Continue
    }

    fn on_page_start(&mut self, page_number: u32) {
        for visitor in &mut self.visitors {
            visitor.on_page_start(page_number);
        }
    }
}
