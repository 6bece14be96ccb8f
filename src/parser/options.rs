//! Parsing options and configuration.

use std::path::PathBuf;

/// Default maximum image width in points (7 inches).
pub const DEFAULT_MAX_IMAGE_WIDTH: f32 = 7.0 * 72.0;

/// Options for parsing Markdown reports.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,

    /// Directory that relative image paths are resolved against
    pub base_dir: Option<PathBuf>,

    /// Maximum display width for images, in points
    pub max_image_width: f32,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Fail on unresolvable image references.
    pub fn strict(mut self) -> Self {
        self.error_mode = ErrorMode::Strict;
        self
    }

    /// Drop unresolvable image references (the default).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Set the base directory for relative image paths.
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// Set the maximum image width in points.
    pub fn with_max_image_width(mut self, width: f32) -> Self {
        self.max_image_width = width.max(1.0);
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Lenient,
            base_dir: None,
            max_image_width: DEFAULT_MAX_IMAGE_WIDTH,
        }
    }
}

/// How to treat image references that cannot be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Return an error for the first unresolvable image
    Strict,
    /// Drop the reference, log a warning and keep going
    #[default]
    Lenient,
}
