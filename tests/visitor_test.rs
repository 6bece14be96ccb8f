//! Integration tests for the visitor pattern.

use mdpdf::model::{Element, ImageRef};
use mdpdf::render::visitor::{
    CompositeVisitor, DefaultVisitor, DocumentVisitor, MaxHeadingDepthVisitor, SkipImagesVisitor,
    VisitorAction,
};
use mdpdf::render::{layout_document, to_pdf_with_visitor, RenderOptions};
use mdpdf::{parse_str, Document};

/// Custom visitor that tracks visit counts.
#[derive(Default)]
struct CountingVisitor {
    heading_count: usize,
    paragraph_count: usize,
    code_count: usize,
    pages: Vec<u32>,
}

impl DocumentVisitor for CountingVisitor {
    fn visit_heading(&mut self, _level: u8, _text: &str) -> VisitorAction {
        self.heading_count += 1;
        VisitorAction::Continue
    }

    fn visit_paragraph(&mut self, _text: &str) -> VisitorAction {
        self.paragraph_count += 1;
        VisitorAction::Continue
    }

    fn visit_code_block(&mut self, _text: &str) -> VisitorAction {
        self.code_count += 1;
        VisitorAction::Continue
    }

    fn on_page_start(&mut self, page_number: u32) {
        self.pages.push(page_number);
    }
}

/// Replaces code blocks with a placeholder paragraph.
struct RedactCode;

impl DocumentVisitor for RedactCode {
    fn visit_code_block(&mut self, _text: &str) -> VisitorAction {
        VisitorAction::Replace(Element::paragraph("[code omitted]"))
    }
}

#[test]
fn test_default_visitor_all_continue() {
    let mut visitor = DefaultVisitor::new();
    assert!(matches!(visitor.visit_heading(1, "T"), VisitorAction::Continue));
    assert!(matches!(visitor.visit_paragraph("p"), VisitorAction::Continue));
    assert!(matches!(visitor.visit_spacer(), VisitorAction::Continue));
    assert!(matches!(
        visitor.visit_image(&ImageRef::new("a.png", "", 1, 1)),
        VisitorAction::Continue
    ));
}

#[test]
fn test_counting_visitor_sees_every_element() {
    let doc = parse_str("# A\ntext\nmore\n```\ncode\n```").unwrap();
    let mut visitor = CountingVisitor::default();
    let laid_out = layout_document(&doc, &RenderOptions::default(), &mut visitor).unwrap();

    assert_eq!(visitor.heading_count, 1);
    assert_eq!(visitor.paragraph_count, 2);
    assert_eq!(visitor.code_count, 1);
    assert_eq!(visitor.pages, vec![1]);
    assert_eq!(laid_out.page_count(), 1);
}

#[test]
fn test_page_start_called_for_every_page() {
    let elements = (0..200).map(|i| Element::paragraph(format!("line {}", i))).collect();
    let doc = Document::from_elements(elements);
    let mut visitor = CountingVisitor::default();
    let laid_out = layout_document(&doc, &RenderOptions::default(), &mut visitor).unwrap();

    let expected: Vec<u32> = (1..=laid_out.page_count()).collect();
    assert_eq!(visitor.pages, expected);
}

#[test]
fn test_replace_changes_layout() {
    let doc = parse_str("```\nsecret()\n```").unwrap();
    let laid_out = layout_document(&doc, &RenderOptions::default(), &mut RedactCode).unwrap();

    assert_eq!(laid_out.pages[0].text(), "[code omitted]");
    assert_eq!(laid_out.stats.code_block_count, 0);
    assert_eq!(laid_out.stats.paragraph_count, 1);
}

#[test]
fn test_composite_first_decision_wins() {
    let mut composite = CompositeVisitor::new()
        .with_visitor(MaxHeadingDepthVisitor::new(1))
        .with_visitor(RedactCode)
        .with_visitor(SkipImagesVisitor);

    let doc = parse_str("### Deep\n```\nx\n```\n").unwrap();
    let result = to_pdf_with_visitor(&doc, &RenderOptions::default(), &mut composite).unwrap();

    assert!(result.pdf.starts_with(b"%PDF-"));
    assert_eq!(result.stats.heading_count, 1);
    assert_eq!(result.stats.paragraph_count, 1);
    assert_eq!(result.stats.code_block_count, 0);
}

#[test]
fn test_skip_images_visitor_counts_skips() {
    let doc = Document::from_elements(vec![
        Element::Image(ImageRef::new("erd.png", "ERD", 10, 10)),
        Element::caption("ERD"),
        Element::paragraph("body"),
    ]);
    let laid_out =
        layout_document(&doc, &RenderOptions::default(), &mut SkipImagesVisitor).unwrap();

    assert!(laid_out.images.is_empty());
    assert_eq!(laid_out.stats.skipped_count, 2);
    assert_eq!(laid_out.stats.image_count, 0);
}
