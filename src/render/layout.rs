//! Pagination of output elements into positioned draw operations.
//!
//! Coordinates are PDF user space: points, origin at the bottom-left
//! corner of the page. Text positions are baselines.

use crate::error::{Error, Result};
use crate::model::{Document, Element, ImageRef};

use super::fonts::Font;
use super::options::{RenderOptions, TextStyle};
use super::visitor::{DocumentVisitor, VisitorAction};
use super::RenderStats;

const EPSILON: f32 = 0.01;
const BULLET: &str = "•";

/// A positioned drawing instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// One line of text
    Text {
        /// Left edge
        x: f32,
        /// Baseline
        y: f32,
        /// Font face
        font: Font,
        /// Font size in points
        size: f32,
        /// Text to show
        text: String,
    },
    /// An image, referencing [`LaidOutDocument::images`]
    Image {
        /// Index into the image list
        index: usize,
        /// Left edge
        x: f32,
        /// Bottom edge
        y: f32,
        /// Display width
        width: f32,
        /// Display height
        height: f32,
    },
}

/// A single laid-out page.
#[derive(Debug, Clone, PartialEq)]
pub struct LaidOutPage {
    /// Page number (1-indexed)
    pub number: u32,
    /// Drawing operations in paint order
    pub ops: Vec<DrawOp>,
}

impl LaidOutPage {
    fn new(number: u32) -> Self {
        Self {
            number,
            ops: Vec::new(),
        }
    }

    /// Check if nothing was placed on the page.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Text of all text operations, one per line.
    pub fn text(&self) -> String {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                DrawOp::Image { .. } => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// The paginated document handed to the PDF writer.
#[derive(Debug, Clone)]
pub struct LaidOutDocument {
    /// Page width in points
    pub page_width: f32,
    /// Page height in points
    pub page_height: f32,
    /// Pages in order; never empty
    pub pages: Vec<LaidOutPage>,
    /// Images referenced by [`DrawOp::Image`]
    pub images: Vec<ImageRef>,
    /// Layout statistics
    pub stats: RenderStats,
}

impl LaidOutDocument {
    /// Get the number of pages.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }
}

/// Lay out a document.
///
/// Fails with [`Error::Layout`] when the margins leave no room for a
/// single line of text.
pub fn layout_document(
    doc: &Document,
    options: &RenderOptions,
    visitor: &mut dyn DocumentVisitor,
) -> Result<LaidOutDocument> {
    check_frame(options)?;
    let mut engine = LayoutEngine::new(options, visitor);
    for element in &doc.elements {
        engine.place(element);
    }
    Ok(engine.finish())
}

/// The frame must fit one em of the largest font past the list indent,
/// and one line of the tallest style.
fn check_frame(options: &RenderOptions) -> Result<()> {
    let (page_width, page_height) = options.page_size.dimensions();
    let margins = &options.margins;
    let frame_width = page_width - margins.left - margins.right;
    let frame_height = page_height - margins.top - margins.bottom;

    let styles = &options.styles;
    let all_styles = || {
        styles
            .headings
            .iter()
            .chain([&styles.body, &styles.code, &styles.caption])
    };
    let largest_size = all_styles().map(|s| s.size).fold(0.0, f32::max);
    let tallest_leading = all_styles().map(|s| s.leading).fold(0.0, f32::max);

    if frame_width < styles.list_indent + largest_size || frame_height < tallest_leading {
        return Err(Error::Layout(format!(
            "frame of {:.1}x{:.1}pt cannot hold a line of text",
            frame_width, frame_height
        )));
    }
    Ok(())
}

struct LayoutEngine<'a> {
    options: &'a RenderOptions,
    visitor: &'a mut dyn DocumentVisitor,
    page_width: f32,
    page_height: f32,
    pages: Vec<LaidOutPage>,
    images: Vec<ImageRef>,
    cursor: f32,
    pending_image_gap: bool,
    stats: RenderStats,
}

impl<'a> LayoutEngine<'a> {
    fn new(options: &'a RenderOptions, visitor: &'a mut dyn DocumentVisitor) -> Self {
        let (page_width, page_height) = options.page_size.dimensions();
        let mut engine = Self {
            options,
            visitor,
            page_width,
            page_height,
            pages: Vec::new(),
            images: Vec::new(),
            cursor: 0.0,
            pending_image_gap: false,
            stats: RenderStats::new(),
        };
        engine.start_page();
        engine
    }

    fn finish(mut self) -> LaidOutDocument {
        self.stats.page_count = self.pages.len() as u32;
        LaidOutDocument {
            page_width: self.page_width,
            page_height: self.page_height,
            pages: self.pages,
            images: self.images,
            stats: self.stats,
        }
    }

    fn top(&self) -> f32 {
        self.page_height - self.options.margins.top
    }

    fn bottom(&self) -> f32 {
        self.options.margins.bottom
    }

    fn left(&self) -> f32 {
        self.options.margins.left
    }

    fn start_page(&mut self) {
        let number = self.pages.len() as u32 + 1;
        log::debug!("Starting page {}", number);
        self.pages.push(LaidOutPage::new(number));
        self.cursor = self.top();
        self.visitor.on_page_start(number);
    }

    fn page_is_empty(&self) -> bool {
        self.pages.last().map_or(true, LaidOutPage::is_empty)
    }

    fn ensure_space(&mut self, height: f32) {
        if self.cursor - height < self.bottom() - EPSILON && !self.page_is_empty() {
            self.start_page();
        }
    }

    fn push_op(&mut self, op: DrawOp) {
        if let Some(page) = self.pages.last_mut() {
            page.ops.push(op);
        }
    }

    fn place(&mut self, element: &Element) {
        match self.visitor.visit(element) {
            VisitorAction::Continue => self.place_element(element),
            VisitorAction::Replace(replacement) => self.place_element(&replacement),
            VisitorAction::Skip => self.stats.skipped_count += 1,
        }
    }

    fn place_element(&mut self, element: &Element) {
        if self.pending_image_gap && !matches!(element, Element::Caption { .. }) {
            self.cursor -= self.options.styles.image_gap;
            self.pending_image_gap = false;
        }

        let options = self.options;
        let styles = &options.styles;
        match element {
            Element::Heading { level, text } => {
                self.stats.heading_count += 1;
                self.stats.count_text(text);
                let style = *styles.heading(*level);
                self.place_wrapped(text, &style, Align::Left);
            }
            Element::Paragraph { text } => {
                self.stats.paragraph_count += 1;
                self.stats.count_text(text);
                let style = styles.body;
                self.place_wrapped(text, &style, Align::Left);
            }
            Element::BulletList { items } => {
                self.stats.list_count += 1;
                self.place_bullets(items);
            }
            Element::CodeBlock { text } => {
                self.stats.code_block_count += 1;
                self.stats.count_text(text);
                self.place_code(text);
            }
            Element::Image(image) => {
                self.stats.image_count += 1;
                self.place_image(image);
            }
            Element::Caption { text } => {
                self.stats.caption_count += 1;
                self.stats.count_text(text);
                let style = styles.caption;
                self.place_wrapped(text, &style, Align::Center);
                if self.pending_image_gap {
                    self.cursor -= styles.image_gap;
                    self.pending_image_gap = false;
                }
            }
            Element::Spacer => {
                self.stats.spacer_count += 1;
                if !self.page_is_empty() {
                    self.cursor -= styles.spacer_height;
                }
            }
        }
    }

    /// Place one row of text segments sharing a baseline.
    fn place_row(&mut self, style: &TextStyle, segments: &[(f32, &str)]) {
        self.ensure_space(style.leading);
        let baseline = self.cursor - style.size;
        for (x, text) in segments {
            if text.is_empty() {
                continue;
            }
            self.push_op(DrawOp::Text {
                x: *x,
                y: baseline,
                font: style.font,
                size: style.size,
                text: (*text).to_string(),
            });
        }
        self.cursor -= style.leading;
    }

    fn place_wrapped(&mut self, text: &str, style: &TextStyle, align: Align) {
        let frame_width = self.options.frame_width();
        let lines = wrap_text(text, style.font, style.size, frame_width);
        for line in &lines {
            let x = match align {
                Align::Left => self.left(),
                Align::Center => {
                    let width = style.font.text_width(line, style.size);
                    self.left() + ((frame_width - width) / 2.0).max(0.0)
                }
            };
            self.place_row(style, &[(x, line)]);
        }
        self.cursor -= style.space_after;
    }

    fn place_bullets(&mut self, items: &[String]) {
        let options = self.options;
        let styles = &options.styles;
        let style = styles.body;
        let bullet_x = self.left() + styles.bullet_indent;
        let text_x = self.left() + styles.list_indent;
        let width = (self.options.frame_width() - styles.list_indent).max(1.0);
        let space_after = styles.list_space_after;

        for item in items {
            self.stats.list_item_count += 1;
            self.stats.count_text(item);
            let mut lines = wrap_text(item, style.font, style.size, width);
            if lines.is_empty() {
                lines.push(String::new());
            }
            for (i, line) in lines.iter().enumerate() {
                if i == 0 {
                    self.place_row(&style, &[(bullet_x, BULLET), (text_x, line)]);
                } else {
                    self.place_row(&style, &[(text_x, line)]);
                }
            }
        }
        self.cursor -= space_after;
    }

    fn place_code(&mut self, text: &str) {
        let style = self.options.styles.code;
        let x = self.left();
        for line in text.split('\n') {
            let line = line.replace('\t', "    ");
            self.place_row(&style, &[(x, &line)]);
        }
        self.cursor -= style.space_after;
    }

    fn place_image(&mut self, image: &ImageRef) {
        let frame_width = self.options.frame_width();
        let (width, height) = image.fit_within(frame_width, self.options.frame_height());
        self.ensure_space(height);

        let x = self.left() + (frame_width - width) / 2.0;
        let y = self.cursor - height;
        let index = self.images.len();
        self.images.push(image.clone());
        self.push_op(DrawOp::Image {
            index,
            x,
            y,
            width,
            height,
        });
        self.cursor = y;
        self.pending_image_gap = true;
    }
}

#[derive(Debug, Clone, Copy)]
enum Align {
    Left,
    Center,
}

/// Greedy word wrap. Whitespace runs collapse to single spaces; words
/// wider than `max_width` are broken between characters.
pub fn wrap_text(text: &str, font: Font, size: f32, max_width: f32) -> Vec<String> {
    let space = font.text_width(" ", size);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0;

    for word in text.split_whitespace() {
        let word_width = font.text_width(word, size);
        if !current.is_empty() {
            if current_width + space + word_width <= max_width + EPSILON {
                current.push(' ');
                current.push_str(word);
                current_width += space + word_width;
                continue;
            }
            lines.push(std::mem::take(&mut current));
            current_width = 0.0;
        }

        if word_width <= max_width + EPSILON {
            current.push_str(word);
            current_width = word_width;
            continue;
        }

        for c in word.chars() {
            let char_width = font.char_width(c) as f32 * size / 1000.0;
            if !current.is_empty() && current_width + char_width > max_width + EPSILON {
                lines.push(std::mem::take(&mut current));
                current_width = 0.0;
            }
            current.push(c);
            current_width += char_width;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
