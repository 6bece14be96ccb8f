//! Integration tests for PDF output.

use mdpdf::render::{self, Margins, PageSize, RenderOptions};
use mdpdf::{parse_str, render_file, Error};

fn report(paragraphs: usize) -> String {
    let mut text = String::from("# Project Phase II\n\n");
    for i in 0..paragraphs {
        text.push_str(&format!("Paragraph {} of the report body.\n", i));
    }
    text
}

#[test]
fn test_output_is_pdf() {
    let doc = parse_str(&report(1)).unwrap();
    let pdf = render::to_pdf(&doc, &RenderOptions::default()).unwrap();
    assert!(pdf.starts_with(b"%PDF-"));
    assert!(pdf.ends_with(b"%%EOF") || pdf.ends_with(b"%%EOF\n"));
}

#[test]
fn test_empty_document_renders_one_page() {
    let doc = parse_str("").unwrap();
    let result = render::to_pdf_with_stats(&doc, &RenderOptions::default()).unwrap();
    assert_eq!(result.stats.page_count, 1);
}

#[test]
fn test_page_count_grows_with_content() {
    let options = RenderOptions::default();
    let short = render::to_pdf_with_stats(&parse_str(&report(5)).unwrap(), &options).unwrap();
    let long = render::to_pdf_with_stats(&parse_str(&report(300)).unwrap(), &options).unwrap();

    assert_eq!(short.stats.page_count, 1);
    assert!(long.stats.page_count > short.stats.page_count);
    assert_eq!(long.stats.paragraph_count, 300);
}

#[test]
fn test_smaller_page_needs_more_pages() {
    let doc = parse_str(&report(120)).unwrap();
    let letter = render::to_pdf_with_stats(&doc, &RenderOptions::default()).unwrap();
    let small = render::to_pdf_with_stats(
        &doc,
        &RenderOptions::default().with_page_size(PageSize::Custom {
            width: 300.0,
            height: 400.0,
        }),
    )
    .unwrap();
    assert!(small.stats.page_count > letter.stats.page_count);
}

#[test]
fn test_stats_count_elements() {
    let doc = parse_str("# A\n## B\n- x\n- y\n```\nz\n```\n\ntext").unwrap();
    let result = render::to_pdf_with_stats(&doc, &RenderOptions::default()).unwrap();
    let stats = result.stats;

    assert_eq!(stats.heading_count, 2);
    assert_eq!(stats.list_count, 1);
    assert_eq!(stats.list_item_count, 2);
    assert_eq!(stats.code_block_count, 1);
    assert_eq!(stats.spacer_count, 1);
    assert_eq!(stats.paragraph_count, 1);
}

#[test]
fn test_render_file_writes_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("Phase_II_Report.md");
    let output = dir.path().join("Project_Phase_II.pdf");
    std::fs::write(&input, report(10)).unwrap();

    let result = render_file(&input, &output).unwrap();
    let bytes = std::fs::read(&output).unwrap();

    assert_eq!(bytes, result.pdf);
    assert_eq!(
        result.metadata.title.as_deref(),
        Some("Project Phase II")
    );
}

#[test]
fn test_render_file_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.pdf");
    let result = render_file(dir.path().join("missing.md"), &output);

    assert!(result.is_err());
    assert!(!output.exists());
}

#[test]
fn test_non_latin_text_does_not_fail() {
    let doc = parse_str("# Résumé\n한국어 텍스트 “quoted”").unwrap();
    let pdf = render::to_pdf(&doc, &RenderOptions::default()).unwrap();
    assert!(pdf.starts_with(b"%PDF-"));
}

#[test]
fn test_margins_wider_than_page_fail() {
    let doc = parse_str(&report(1)).unwrap();
    let options = RenderOptions::default().with_margins(Margins::uniform(320.0));

    let result = render::to_pdf(&doc, &options);
    assert!(matches!(result, Err(Error::Layout(_))));
}

#[test]
fn test_producer_in_info_dictionary() {
    let mut doc = parse_str("text").unwrap();
    let options = RenderOptions::default().with_compression(false);

    let pdf = render::to_pdf(&doc, &options).unwrap();
    assert!(pdf.windows(6).any(|w| w == b"(mdpdf"));

    doc.metadata.producer = Some("Team 7 exporter".to_string());
    let pdf = render::to_pdf(&doc, &options).unwrap();
    assert!(pdf.windows(17).any(|w| w == b"(Team 7 exporter)"));
}
