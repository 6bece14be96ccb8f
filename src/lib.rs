//! # mdpdf
//!
//! Render lightweight Markdown reports to paginated PDF.
//!
//! The input dialect is deliberately small: `#` headings, `- ` bullets,
//! fenced code blocks, standalone image references and plain paragraphs.
//! Each line is classified once; code and bullet lines accumulate into
//! blocks that are flushed when a different kind of line arrives.
//!
//! ## Quick Start
//!
//! ```no_run
//! use mdpdf::{parse_file, render};
//!
//! fn main() -> mdpdf::Result<()> {
//!     let doc = parse_file("Phase_II_Report.md")?;
//!
//!     let options = render::RenderOptions::default();
//!     render::write_pdf(&doc, "Project_Phase_II.pdf", &options)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Streaming parser**: line-by-line with explicit block state
//! - **Images**: scaled to the frame, captioned with their alt text
//! - **Standard fonts**: no font embedding, WinAnsi text encoding
//! - **Parallel decoding**: embedded images are decoded with Rayon
//! - **Other outputs**: JSON and plain text dumps of the element stream

pub mod error;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use error::{Error, Result};
pub use model::{Document, Element, ElementKind, ImageRef, Metadata};
pub use parser::{DocumentParser, ErrorMode, ParseOptions, ParseOutcome, ParseReport};
pub use render::{JsonFormat, Margins, PageSize, RenderOptions, RenderResult, RenderStats};

use std::io::Read;
use std::path::{Path, PathBuf};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Parse Markdown text into a document.
///
/// Relative image paths resolve against the current directory.
///
/// # Example
///
/// ```
/// use mdpdf::{parse_str, Element};
///
/// let doc = parse_str("# Title\n- a\n- b\n").unwrap();
/// assert_eq!(doc.elements[0], Element::heading(1, "Title"));
/// assert_eq!(doc.elements[1], Element::bullet_list(["a", "b"]));
/// ```
pub fn parse_str(text: &str) -> Result<Document> {
    Ok(DocumentParser::new().parse_str(text)?.document)
}

/// Parse a Markdown file and return a structured document.
///
/// Relative image paths resolve against the file's directory.
///
/// # Example
///
/// ```no_run
/// use mdpdf::parse_file;
///
/// let doc = parse_file("Phase_II_Report.md").unwrap();
/// println!("Elements: {}", doc.len());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    parse_file_with_options(path, ParseOptions::default())
}

/// Parse a Markdown file with custom options.
///
/// # Example
///
/// ```no_run
/// use mdpdf::{parse_file_with_options, ParseOptions};
///
/// let options = ParseOptions::new().strict();
/// let doc = parse_file_with_options("Phase_II_Report.md", options).unwrap();
/// ```
pub fn parse_file_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Document> {
    let outcome = DocumentParser::with_options(options).parse_file(path)?;
    Ok(outcome.document)
}

/// Parse Markdown from a reader.
///
/// The input must be valid UTF-8.
pub fn parse_reader<R: Read>(reader: R) -> Result<Document> {
    Ok(DocumentParser::new().parse_reader(reader)?.document)
}

/// Render a Markdown file straight to a PDF file.
///
/// The PDF title defaults to the first level-1 heading and the creation
/// date is the current time.
///
/// # Example
///
/// ```no_run
/// let result = mdpdf::render_file("Phase_II_Report.md", "Project_Phase_II.pdf")?;
/// println!("{} pages", result.stats.page_count);
/// # Ok::<(), mdpdf::Error>(())
/// ```
pub fn render_file<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Result<RenderResult> {
    Mdpdf::new().parse(input)?.write_pdf(output)
}

/// Builder for parsing and rendering with custom options.
///
/// # Example
///
/// ```no_run
/// use mdpdf::{Mdpdf, PageSize};
///
/// let result = Mdpdf::new()
///     .strict()
///     .with_page_size(PageSize::A4)
///     .with_title("Project Phase II")
///     .parse("Phase_II_Report.md")?
///     .write_pdf("Project_Phase_II.pdf")?;
/// # Ok::<(), mdpdf::Error>(())
/// ```
pub struct Mdpdf {
    parse_options: ParseOptions,
    render_options: RenderOptions,
    title: Option<String>,
    author: Option<String>,
}

impl Mdpdf {
    /// Create a new Mdpdf builder.
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions::default(),
            render_options: RenderOptions::default(),
            title: None,
            author: None,
        }
    }

    /// Fail on unresolvable image references.
    pub fn strict(mut self) -> Self {
        self.parse_options = self.parse_options.strict();
        self
    }

    /// Drop unresolvable image references with a warning.
    pub fn lenient(mut self) -> Self {
        self.parse_options = self.parse_options.lenient();
        self
    }

    /// Resolve relative image paths against `dir`.
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.parse_options = self.parse_options.with_base_dir(dir);
        self
    }

    /// Set the maximum image width in points.
    pub fn with_max_image_width(mut self, width: f32) -> Self {
        self.parse_options = self.parse_options.with_max_image_width(width);
        self
    }

    /// Set the page size.
    pub fn with_page_size(mut self, size: PageSize) -> Self {
        self.render_options = self.render_options.with_page_size(size);
        self
    }

    /// Set the page margins.
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.render_options = self.render_options.with_margins(margins);
        self
    }

    /// Write uncompressed content streams.
    pub fn uncompressed(mut self) -> Self {
        self.render_options = self.render_options.with_compression(false);
        self
    }

    /// Disable parallel image decoding.
    pub fn sequential(mut self) -> Self {
        self.render_options = self.render_options.sequential();
        self
    }

    /// Set the document title instead of inferring it.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the document author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Parse a Markdown file and return a result wrapper.
    pub fn parse<P: AsRef<Path>>(self, path: P) -> Result<MdpdfResult> {
        let outcome = DocumentParser::with_options(self.parse_options.clone()).parse_file(path)?;
        Ok(self.finish(outcome))
    }

    /// Parse Markdown text.
    pub fn parse_str(self, text: &str) -> Result<MdpdfResult> {
        let outcome = DocumentParser::with_options(self.parse_options.clone()).parse_str(text)?;
        Ok(self.finish(outcome))
    }

    fn finish(self, outcome: ParseOutcome) -> MdpdfResult {
        let ParseOutcome {
            mut document,
            report,
        } = outcome;

        let metadata = &mut document.metadata;
        if self.title.is_some() {
            metadata.title = self.title;
        }
        if self.author.is_some() {
            metadata.author = self.author;
        }
        metadata.creator = Some(format!("mdpdf {}", VERSION));
        metadata.stamp_now();
        document.infer_title();

        if report.has_warnings() {
            log::warn!(
                "Parsed with warnings: {} missing image(s), unterminated fence: {}",
                report.missing_images.len(),
                report.unterminated_fence
            );
        }

        MdpdfResult {
            document,
            report,
            render_options: self.render_options,
        }
    }
}

impl Default for Mdpdf {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of parsing a Markdown report.
pub struct MdpdfResult {
    /// The parsed document
    pub document: Document,
    /// Parse diagnostics
    pub report: ParseReport,
    /// Render options to use
    render_options: RenderOptions,
}

impl MdpdfResult {
    /// Render to PDF bytes.
    pub fn to_pdf(&self) -> Result<Vec<u8>> {
        render::to_pdf(&self.document, &self.render_options)
    }

    /// Render to PDF with layout statistics.
    pub fn to_pdf_with_stats(&self) -> Result<RenderResult> {
        render::to_pdf_with_stats(&self.document, &self.render_options)
    }

    /// Render and write the PDF to `path`.
    pub fn write_pdf<P: AsRef<Path>>(&self, path: P) -> Result<RenderResult> {
        render::write_pdf(&self.document, path, &self.render_options)
    }

    /// Convert to plain text.
    pub fn to_text(&self) -> String {
        render::to_text(&self.document)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }
}
