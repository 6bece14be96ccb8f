//! Rendering result with metadata and statistics.

use crate::model::Metadata;
use serde::{Deserialize, Serialize};

/// Result of rendering a document, including the PDF and statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered PDF bytes
    #[serde(skip)]
    pub pdf: Vec<u8>,

    /// Document metadata (copied from source document)
    pub metadata: Metadata,

    /// Rendering statistics
    pub stats: RenderStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(pdf: Vec<u8>, metadata: Metadata, stats: RenderStats) -> Self {
        Self {
            pdf,
            metadata,
            stats,
        }
    }

    /// Get the PDF length in bytes.
    pub fn pdf_len(&self) -> usize {
        self.pdf.len()
    }
}

/// Statistics collected during layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderStats {
    /// Number of pages produced
    pub page_count: u32,

    /// Number of headings placed
    pub heading_count: u32,

    /// Number of paragraphs placed
    pub paragraph_count: u32,

    /// Number of bullet lists placed
    pub list_count: u32,

    /// Number of bullet items placed
    pub list_item_count: u32,

    /// Number of code blocks placed
    pub code_block_count: u32,

    /// Number of images placed
    pub image_count: u32,

    /// Number of captions placed
    pub caption_count: u32,

    /// Number of spacers seen
    pub spacer_count: u32,

    /// Number of elements dropped by a visitor
    pub skipped_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,
}

impl RenderStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }
}
