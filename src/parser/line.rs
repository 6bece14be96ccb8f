//! Per-line classification.

use regex::Regex;
use std::sync::OnceLock;

/// Marker line that is discarded.
pub const HORIZONTAL_RULE: &str = "---";

/// Prefix that opens and closes a code block.
pub const CODE_FENCE: &str = "```";

/// Prefix of a bullet item.
pub const BULLET_MARKER: &str = "- ";

fn image_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^!\[(.*?)\]\((.*?)\)").expect("image pattern is valid"))
}

/// The kind of a single source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// `---` on its own
    HorizontalRule,
    /// A code fence delimiter
    Fence,
    /// A bullet item, marker stripped
    Bullet(&'a str),
    /// An image reference
    Image {
        /// Alt text between the brackets
        alt: &'a str,
        /// Path between the parentheses
        path: &'a str,
    },
    /// Empty or whitespace-only line
    Blank,
    /// A `#` heading
    Heading {
        /// Number of leading `#`
        level: usize,
        /// Remaining text, trimmed
        text: &'a str,
    },
    /// Anything else
    Text(&'a str),
}

/// Classify a line. First matching rule wins.
///
/// Trailing whitespace is ignored. Whether the line sits inside an open
/// code block is not known here; the reducer handles that.
pub fn classify(line: &str) -> LineKind<'_> {
    let line = line.trim_end();
    let trimmed = line.trim_start();

    if trimmed == HORIZONTAL_RULE {
        return LineKind::HorizontalRule;
    }
    if line.starts_with(CODE_FENCE) {
        return LineKind::Fence;
    }
    if let Some(rest) = line.strip_prefix(BULLET_MARKER) {
        return LineKind::Bullet(rest.trim());
    }
    if let Some(caps) = image_pattern().captures(trimmed) {
        let alt = caps.get(1).map_or("", |m| m.as_str());
        let path = caps.get(2).map_or("", |m| m.as_str());
        return LineKind::Image { alt, path };
    }
    if trimmed.is_empty() {
        return LineKind::Blank;
    }
    if line.starts_with('#') {
        let level = line.len() - line.trim_start_matches('#').len();
        let text = line[level..].trim();
        return LineKind::Heading { level, text };
    }
    LineKind::Text(line)
}
