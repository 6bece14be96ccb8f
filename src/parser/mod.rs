//! Markdown report parsing.
//!
//! A single linear pass classifies each line and accumulates code and
//! bullet lines into blocks, emitting [`Element`](crate::model::Element)s
//! in source order.

pub mod images;
pub mod line;
mod options;
mod reducer;

pub use line::{classify, LineKind};
pub use options::{ErrorMode, ParseOptions, DEFAULT_MAX_IMAGE_WIDTH};
pub use reducer::{DocumentParser, Mode, ParseOutcome, ParseReport, ParserState};
