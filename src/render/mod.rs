//! Rendering module for turning parsed documents into PDF and other formats.

pub mod fonts;
mod json;
pub mod layout;
mod options;
mod pdf;
mod result;
mod text;
pub mod visitor;

pub use json::{to_json, JsonFormat};
pub use layout::{layout_document, DrawOp, LaidOutDocument, LaidOutPage};
pub use options::{Margins, PageSize, RenderOptions, Styles, TextStyle};
pub use pdf::{to_pdf, to_pdf_with_stats, to_pdf_with_visitor, write_document, write_pdf};
pub use result::{RenderResult, RenderStats};
pub use text::to_text;
pub use visitor::{
    CompositeVisitor, DefaultVisitor, DocumentVisitor, MaxHeadingDepthVisitor, SkipImagesVisitor,
    VisitorAction,
};
