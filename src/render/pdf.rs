//! PDF serialization of a laid-out document.

use std::io::Write;
use std::path::Path;

use chrono::{Datelike, Timelike};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use pdf_writer::{Content, Date, Filter, Finish, Name, Pdf, Rect, Ref, Str, TextStr};
use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::model::{Document, ImageRef, Metadata};

use super::fonts::{encode_win_ansi, Font};
use super::layout::{layout_document, DrawOp, LaidOutDocument, LaidOutPage};
use super::options::RenderOptions;
use super::visitor::{DefaultVisitor, DocumentVisitor};
use super::RenderResult;

/// Render a document to PDF bytes.
pub fn to_pdf(doc: &Document, options: &RenderOptions) -> Result<Vec<u8>> {
    Ok(to_pdf_with_stats(doc, options)?.pdf)
}

/// Render a document to PDF, returning layout statistics alongside.
pub fn to_pdf_with_stats(doc: &Document, options: &RenderOptions) -> Result<RenderResult> {
    to_pdf_with_visitor(doc, options, &mut DefaultVisitor)
}

/// Render a document to PDF, consulting `visitor` for every element.
pub fn to_pdf_with_visitor(
    doc: &Document,
    options: &RenderOptions,
    visitor: &mut dyn DocumentVisitor,
) -> Result<RenderResult> {
    let laid_out = layout_document(doc, options, visitor)?;
    let pdf = write_document(&laid_out, &doc.metadata, options)?;
    Ok(RenderResult::new(pdf, doc.metadata.clone(), laid_out.stats))
}

/// Render a document and write the PDF to `path`.
///
/// Nothing is written if rendering fails.
pub fn write_pdf<P: AsRef<Path>>(
    doc: &Document,
    path: P,
    options: &RenderOptions,
) -> Result<RenderResult> {
    let result = to_pdf_with_stats(doc, options)?;
    std::fs::write(path.as_ref(), &result.pdf)?;
    log::debug!(
        "Wrote {} bytes to {}",
        result.pdf_len(),
        path.as_ref().display()
    );
    Ok(result)
}

/// Decoded image ready for embedding.
struct EncodedImage {
    width: u32,
    height: u32,
    rgb: Vec<u8>,
    alpha: Option<Vec<u8>>,
}

/// Serialize a laid-out document to PDF bytes.
pub fn write_document(
    laid_out: &LaidOutDocument,
    metadata: &Metadata,
    options: &RenderOptions,
) -> Result<Vec<u8>> {
    let images = encode_images(&laid_out.images, options.parallel)?;

    let mut alloc = Ref::new(1);
    let catalog_id = alloc.bump();
    let page_tree_id = alloc.bump();
    let info_id = alloc.bump();
    let font_ids: Vec<(Font, Ref)> = Font::ALL.iter().map(|f| (*f, alloc.bump())).collect();
    let image_ids: Vec<(Ref, Option<Ref>)> = images
        .iter()
        .map(|img| (alloc.bump(), img.alpha.as_ref().map(|_| alloc.bump())))
        .collect();
    let page_ids: Vec<(Ref, Ref)> = laid_out
        .pages
        .iter()
        .map(|_| (alloc.bump(), alloc.bump()))
        .collect();

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id)
        .kids(page_ids.iter().map(|(page_id, _)| *page_id))
        .count(page_ids.len() as i32);

    write_info(&mut pdf, info_id, metadata);

    for (font, id) in &font_ids {
        pdf.type1_font(*id)
            .base_font(font.base_font())
            .encoding_predefined(Name(b"WinAnsiEncoding"));
    }

    for (image, (image_id, mask_id)) in images.iter().zip(&image_ids) {
        let mut xobject = pdf.image_xobject(*image_id, &image.rgb);
        xobject.filter(Filter::FlateDecode);
        xobject.width(image.width as i32);
        xobject.height(image.height as i32);
        xobject.color_space().device_rgb();
        xobject.bits_per_component(8);
        if let Some(mask_id) = mask_id {
            xobject.s_mask(*mask_id);
        }
        xobject.finish();

        if let (Some(alpha), Some(mask_id)) = (&image.alpha, mask_id) {
            let mut mask = pdf.image_xobject(*mask_id, alpha);
            mask.filter(Filter::FlateDecode);
            mask.width(image.width as i32);
            mask.height(image.height as i32);
            mask.color_space().device_gray();
            mask.bits_per_component(8);
            mask.finish();
        }
    }

    let media_box = Rect::new(0.0, 0.0, laid_out.page_width, laid_out.page_height);
    for (page, (page_id, content_id)) in laid_out.pages.iter().zip(&page_ids) {
        let mut writer = pdf.page(*page_id);
        writer.media_box(media_box);
        writer.parent(page_tree_id);
        writer.contents(*content_id);

        let mut resources = writer.resources();
        {
            let mut fonts = resources.fonts();
            for (font, id) in &font_ids {
                fonts.pair(font.resource_name(), *id);
            }
        }
        {
            let mut xobjects = resources.x_objects();
            for index in image_indices(page) {
                let name = image_name(index);
                xobjects.pair(Name(name.as_bytes()), image_ids[index].0);
            }
        }
        resources.finish();
        writer.finish();

        let content = page_content(page);
        if options.compress {
            let compressed = deflate(&content)?;
            pdf.stream(*content_id, &compressed)
                .filter(Filter::FlateDecode);
        } else {
            pdf.stream(*content_id, &content);
        }
    }

    log::debug!(
        "Wrote {} pages with {} images",
        laid_out.pages.len(),
        images.len()
    );
    Ok(pdf.finish())
}

fn write_info(pdf: &mut Pdf, id: Ref, metadata: &Metadata) {
    let producer = metadata
        .producer
        .clone()
        .unwrap_or_else(|| format!("mdpdf {}", crate::VERSION));
    let mut info = pdf.document_info(id);
    if let Some(title) = &metadata.title {
        info.title(TextStr(title));
    }
    if let Some(author) = &metadata.author {
        info.author(TextStr(author));
    }
    if let Some(subject) = &metadata.subject {
        info.subject(TextStr(subject));
    }
    if let Some(keywords) = &metadata.keywords {
        info.keywords(TextStr(keywords));
    }
    if let Some(creator) = &metadata.creator {
        info.creator(TextStr(creator));
    }
    info.producer(TextStr(&producer));
    if let Some(created) = metadata.created {
        let date = Date::new(created.year().clamp(0, 9999) as u16)
            .month(created.month() as u8)
            .day(created.day() as u8)
            .hour(created.hour() as u8)
            .minute(created.minute() as u8)
            .second(created.second() as u8)
            .utc_offset_hour(0);
        info.creation_date(date);
    }
    info.finish();
}

/// Build the content stream of a page.
fn page_content(page: &LaidOutPage) -> Vec<u8> {
    let mut content = Content::new();
    for op in &page.ops {
        match op {
            DrawOp::Text {
                x,
                y,
                font,
                size,
                text,
            } => {
                let encoded = encode_win_ansi(text);
                content.begin_text();
                content.set_font(font.resource_name(), *size);
                content.next_line(*x, *y);
                content.show(Str(&encoded));
                content.end_text();
            }
            DrawOp::Image {
                index,
                x,
                y,
                width,
                height,
            } => {
                let name = image_name(*index);
                content.save_state();
                content.transform([*width, 0.0, 0.0, *height, *x, *y]);
                content.x_object(Name(name.as_bytes()));
                content.restore_state();
            }
        }
    }
    content.finish()
}

fn image_indices(page: &LaidOutPage) -> Vec<usize> {
    let mut indices: Vec<usize> = page
        .ops
        .iter()
        .filter_map(|op| match op {
            DrawOp::Image { index, .. } => Some(*index),
            DrawOp::Text { .. } => None,
        })
        .collect();
    indices.sort_unstable();
    indices.dedup();
    indices
}

fn image_name(index: usize) -> String {
    format!("Im{}", index + 1)
}

fn encode_images(images: &[ImageRef], parallel: bool) -> Result<Vec<EncodedImage>> {
    if parallel && images.len() > 1 {
        images.par_iter().map(encode_image).collect()
    } else {
        images.iter().map(encode_image).collect()
    }
}

fn encode_image(image: &ImageRef) -> Result<EncodedImage> {
    if !image.path.is_file() {
        return Err(Error::ImageNotFound(image.path.clone()));
    }
    let decoded = image::open(&image.path)?;
    let (width, height) = (decoded.width(), decoded.height());

    let alpha = if decoded.color().has_alpha() {
        let mask: Vec<u8> = decoded.to_rgba8().pixels().map(|p| p.0[3]).collect();
        Some(deflate(&mask)?)
    } else {
        None
    };
    let rgb = deflate(decoded.to_rgb8().as_raw())?;

    log::debug!(
        "Encoded image {} ({}x{}, alpha: {})",
        image.path.display(),
        width,
        height,
        alpha.is_some()
    );
    Ok(EncodedImage {
        width,
        height,
        rgb,
        alpha,
    })
}

fn deflate(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}
