//! Document model types for rendered report content.
//!
//! This module defines the ordered output-element sequence that bridges
//! Markdown parsing and page layout. The sequence is append-only while
//! parsing and consumed whole by the renderers.

mod document;
mod element;
mod image;

pub use document::{Document, Metadata};
pub use element::{Element, ElementKind};
pub use image::ImageRef;
