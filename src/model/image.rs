//! Image references resolved during parsing.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A resolved image reference.
///
/// Intrinsic pixel dimensions are treated as points (72 dpi), the same
/// convention PDF libraries use when an image carries no resolution hint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRef {
    /// Path of the image file on disk
    pub path: PathBuf,

    /// Alternative text from the reference
    pub alt_text: String,

    /// Intrinsic width in pixels
    pub pixel_width: u32,

    /// Intrinsic height in pixels
    pub pixel_height: u32,

    /// Display width in points
    pub width: f32,

    /// Display height in points
    pub height: f32,
}

impl ImageRef {
    /// Create an image reference displayed at its intrinsic size.
    pub fn new(
        path: impl Into<PathBuf>,
        alt_text: impl Into<String>,
        pixel_width: u32,
        pixel_height: u32,
    ) -> Self {
        Self {
            path: path.into(),
            alt_text: alt_text.into(),
            pixel_width,
            pixel_height,
            width: pixel_width as f32,
            height: pixel_height as f32,
        }
    }

    /// Scale the display size down so the width fits `max_width`.
    ///
    /// Images already narrow enough are left untouched; the aspect ratio
    /// is always preserved.
    pub fn fit_to_width(mut self, max_width: f32) -> Self {
        if self.width > max_width && self.width > 0.0 {
            let ratio = max_width / self.width;
            self.width *= ratio;
            self.height *= ratio;
        }
        self
    }

    /// Scale the display size to fit inside a `max_width` x `max_height` box.
    pub fn fit_within(&self, max_width: f32, max_height: f32) -> (f32, f32) {
        let mut ratio: f32 = 1.0;
        if self.width > max_width && self.width > 0.0 {
            ratio = ratio.min(max_width / self.width);
        }
        if self.height > max_height && self.height > 0.0 {
            ratio = ratio.min(max_height / self.height);
        }
        (self.width * ratio, self.height * ratio)
    }

    /// Check if the reference carries a caption.
    pub fn has_caption(&self) -> bool {
        !self.alt_text.is_empty()
    }

    /// Get the image path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
