//! Rendering options and configuration.

use super::fonts::Font;

const INCH: f32 = 72.0;

/// Options for rendering a document to PDF.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Page size
    pub page_size: PageSize,

    /// Page margins in points
    pub margins: Margins,

    /// Element styles
    pub styles: Styles,

    /// Flate-compress page content streams
    pub compress: bool,

    /// Decode embedded images in parallel
    pub parallel: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size.
    pub fn with_page_size(mut self, size: PageSize) -> Self {
        self.page_size = size;
        self
    }

    /// Set the page margins.
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    /// Set the element styles.
    pub fn with_styles(mut self, styles: Styles) -> Self {
        self.styles = styles;
        self
    }

    /// Enable or disable content stream compression.
    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Disable parallel image decoding.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Width of the printable frame.
    pub fn frame_width(&self) -> f32 {
        let (width, _) = self.page_size.dimensions();
        (width - self.margins.left - self.margins.right).max(1.0)
    }

    /// Height of the printable frame.
    pub fn frame_height(&self) -> f32 {
        let (_, height) = self.page_size.dimensions();
        (height - self.margins.top - self.margins.bottom).max(1.0)
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            page_size: PageSize::Letter,
            margins: Margins::default(),
            styles: Styles::default(),
            compress: true,
            parallel: true,
        }
    }
}

/// Page size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PageSize {
    /// US Letter (8.5 x 11 inches)
    #[default]
    Letter,
    /// A4 (210 x 297 mm)
    A4,
    /// Custom size in points
    Custom {
        /// Width in points
        width: f32,
        /// Height in points
        height: f32,
    },
}

impl PageSize {
    /// Page dimensions as (width, height) in points.
    pub fn dimensions(&self) -> (f32, f32) {
        match self {
            PageSize::Letter => (612.0, 792.0),
            PageSize::A4 => (595.0, 842.0),
            PageSize::Custom { width, height } => (*width, *height),
        }
    }
}

/// Page margins in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    /// Left margin
    pub left: f32,
    /// Right margin
    pub right: f32,
    /// Top margin
    pub top: f32,
    /// Bottom margin
    pub bottom: f32,
}

impl Margins {
    /// Same margin on every side.
    pub fn uniform(value: f32) -> Self {
        Self {
            left: value,
            right: value,
            top: value,
            bottom: value,
        }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            left: 36.0,
            right: 36.0,
            top: 42.0,
            bottom: 42.0,
        }
    }
}

/// Font and spacing for a run of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Font face
    pub font: Font,
    /// Font size in points
    pub size: f32,
    /// Distance between baselines
    pub leading: f32,
    /// Gap after the block
    pub space_after: f32,
}

impl TextStyle {
    /// Create a text style.
    pub const fn new(font: Font, size: f32, leading: f32, space_after: f32) -> Self {
        Self {
            font,
            size,
            leading,
            space_after,
        }
    }
}

/// Styles for every element kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Styles {
    /// Paragraphs, list items, and headings deeper than level 3
    pub body: TextStyle,

    /// Heading levels 1 to 3
    pub headings: [TextStyle; 3],

    /// Code blocks
    pub code: TextStyle,

    /// Image captions
    pub caption: TextStyle,

    /// Indent of list item text
    pub list_indent: f32,

    /// Indent of the bullet glyph
    pub bullet_indent: f32,

    /// Gap after a whole bullet list
    pub list_space_after: f32,

    /// Height of a blank-line spacer
    pub spacer_height: f32,

    /// Gap after an image (and its caption)
    pub image_gap: f32,
}

impl Styles {
    /// Style of a heading. Levels beyond 3 use body styling.
    pub fn heading(&self, level: u8) -> &TextStyle {
        match level {
            1..=3 => &self.headings[(level - 1) as usize],
            _ => &self.body,
        }
    }
}

impl Default for Styles {
    fn default() -> Self {
        Self {
            body: TextStyle::new(Font::Helvetica, 10.0, 12.0, 6.0),
            headings: [
                TextStyle::new(Font::HelveticaBold, 18.0, 22.0, 12.0),
                TextStyle::new(Font::HelveticaBold, 14.0, 18.0, 8.0),
                TextStyle::new(Font::HelveticaBold, 12.0, 14.4, 6.0),
            ],
            code: TextStyle::new(Font::Courier, 9.0, 11.0, 0.18 * INCH),
            caption: TextStyle::new(Font::HelveticaOblique, 10.0, 12.0, 0.0),
            list_indent: 18.0,
            bullet_indent: 9.0,
            list_space_after: 6.0,
            spacer_height: 0.15 * INCH,
            image_gap: 0.2 * INCH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_options_builder() {
        let options = RenderOptions::new()
            .with_page_size(PageSize::A4)
            .with_margins(Margins::uniform(50.0))
            .with_compression(false)
            .sequential();

        assert_eq!(options.page_size, PageSize::A4);
        assert_eq!(options.margins.left, 50.0);
        assert!(!options.compress);
        assert!(!options.parallel);
    }

    #[test]
    fn test_default_frame() {
        let options = RenderOptions::default();
        assert_eq!(options.frame_width(), 540.0);
        assert_eq!(options.frame_height(), 708.0);
    }

    #[test]
    fn test_heading_style_fallback() {
        let styles = Styles::default();
        assert_eq!(styles.heading(1).size, 18.0);
        assert_eq!(styles.heading(3).size, 12.0);
        assert_eq!(styles.heading(4), &styles.body);
        assert_eq!(styles.heading(0), &styles.body);
    }

    #[test]
    fn test_custom_page_size() {
        let size = PageSize::Custom {
            width: 400.0,
            height: 600.0,
        };
        assert_eq!(size.dimensions(), (400.0, 600.0));
    }
}
