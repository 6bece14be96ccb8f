//! Error types for mdpdf library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for mdpdf operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while rendering a document.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// An image reference points to a file that does not exist.
    ///
    /// Only raised in strict mode; lenient parsing drops the reference.
    #[error("Image not found: {}", .0.display())]
    ImageNotFound(PathBuf),

    /// An image file exists but could not be decoded.
    #[error("Image decoding error: {0}")]
    ImageDecode(String),

    /// The page frame cannot hold content.
    #[error("Layout error: {0}")]
    Layout(String),

    /// Error while producing output (PDF, JSON, text).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Encoding error.
    #[error("Encoding error: {0}")]
    Encoding(String),
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(e) => Error::Io(e),
            _ => Error::ImageDecode(err.to_string()),
        }
    }
}
