//! Block-accumulating reducer turning lines into output elements.

use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::model::{Document, Element};

use super::images::{load_image_ref, resolve_path};
use super::line::{classify, LineKind};
use super::options::{ErrorMode, ParseOptions};

/// Whether the reducer is inside a fenced code block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Regular line classification
    #[default]
    Normal,
    /// Every line is code until the closing fence
    InCode,
}

/// Buffered state threaded through the single pass.
///
/// The bullet buffer is orthogonal to `mode`: it is flushed when a fence
/// opens, so it is always empty while `mode` is [`Mode::InCode`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParserState {
    /// Current mode
    pub mode: Mode,
    /// Lines of the open code block
    pub code_lines: Vec<String>,
    /// Items of the open bullet list
    pub bullet_items: Vec<String>,
}

/// Diagnostics gathered while parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    /// Number of lines consumed
    pub line_count: usize,
    /// Image references that were dropped
    pub missing_images: Vec<PathBuf>,
    /// Input ended inside a code fence
    pub unterminated_fence: bool,
}

impl ParseReport {
    /// Check if anything was silently dropped or implicitly closed.
    pub fn has_warnings(&self) -> bool {
        !self.missing_images.is_empty() || self.unterminated_fence
    }
}

/// Result of a full parse.
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    /// The parsed document
    pub document: Document,
    /// Parse diagnostics
    pub report: ParseReport,
}

/// Markdown report parser.
pub struct DocumentParser {
    options: ParseOptions,
    state: ParserState,
    elements: Vec<Element>,
    report: ParseReport,
}

impl DocumentParser {
    /// Create a parser with default options.
    pub fn new() -> Self {
        Self::with_options(ParseOptions::default())
    }

    /// Create a parser with custom options.
    pub fn with_options(options: ParseOptions) -> Self {
        Self {
            options,
            state: ParserState::default(),
            elements: Vec::new(),
            report: ParseReport::default(),
        }
    }

    /// Current buffered state.
    pub fn state(&self) -> &ParserState {
        &self.state
    }

    /// Elements emitted so far.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Consume one source line.
    pub fn feed(&mut self, raw: &str) -> Result<()> {
        self.report.line_count += 1;
        let line = raw.trim_end();

        match (self.state.mode, classify(line)) {
            (_, LineKind::HorizontalRule) => {}
            (Mode::Normal, LineKind::Fence) => {
                self.flush_bullets();
                self.state.mode = Mode::InCode;
            }
            (Mode::InCode, LineKind::Fence) => {
                self.flush_code();
                self.state.mode = Mode::Normal;
            }
            (Mode::InCode, _) => self.state.code_lines.push(line.to_string()),
            (Mode::Normal, LineKind::Bullet(item)) => {
                self.state.bullet_items.push(item.to_string());
            }
            (Mode::Normal, LineKind::Image { alt, path }) => {
                self.close_blocks();
                self.emit_image(alt, path)?;
            }
            (Mode::Normal, LineKind::Blank) => {
                self.close_blocks();
                self.elements.push(Element::Spacer);
            }
            (Mode::Normal, LineKind::Heading { level, text }) => {
                self.close_blocks();
                let level = level.min(u8::MAX as usize) as u8;
                self.elements.push(Element::heading(level, text));
            }
            (Mode::Normal, LineKind::Text(text)) => {
                self.close_blocks();
                self.elements.push(Element::paragraph(text));
            }
        }
        Ok(())
    }

    /// Flush open blocks and return the result.
    pub fn finish(mut self) -> ParseOutcome {
        if self.state.mode == Mode::InCode {
            log::debug!(
                "Input ended inside a code fence; closing it with {} lines",
                self.state.code_lines.len()
            );
            self.report.unterminated_fence = true;
            self.state.mode = Mode::Normal;
        }
        self.flush_code();
        self.flush_bullets();

        ParseOutcome {
            document: Document::from_elements(self.elements),
            report: self.report,
        }
    }

    /// Parse a sequence of lines.
    pub fn parse_lines<I, S>(mut self, lines: I) -> Result<ParseOutcome>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.feed(line.as_ref())?;
        }
        Ok(self.finish())
    }

    /// Parse a whole text.
    pub fn parse_str(self, text: &str) -> Result<ParseOutcome> {
        self.parse_lines(text.lines())
    }

    /// Parse from a reader. The input must be UTF-8.
    pub fn parse_reader<R: Read>(self, mut reader: R) -> Result<ParseOutcome> {
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::InvalidData => {
                    Error::Encoding("input is not valid UTF-8".to_string())
                }
                _ => Error::Io(e),
            })?;
        self.parse_str(&text)
    }

    /// Parse a file. Relative image paths resolve against the file's
    /// directory unless a base directory was configured.
    pub fn parse_file<P: AsRef<Path>>(mut self, path: P) -> Result<ParseOutcome> {
        let path = path.as_ref();
        if self.options.base_dir.is_none() {
            self.options.base_dir = path.parent().map(Path::to_path_buf);
        }
        let file = std::fs::File::open(path)?;
        let mut outcome = self.parse_reader(file)?;
        outcome.document.metadata.source = Some(path.to_path_buf());
        Ok(outcome)
    }

    /// Flush the bullet block, then any open code block.
    fn close_blocks(&mut self) {
        self.flush_bullets();
        self.flush_code();
    }

    fn emit_image(&mut self, alt: &str, raw_path: &str) -> Result<()> {
        let path = resolve_path(raw_path, self.options.base_dir.as_deref());
        match load_image_ref(path.clone(), alt, self.options.max_image_width) {
            Ok(image) => {
                self.elements.push(Element::Image(image));
                if !alt.is_empty() {
                    self.elements.push(Element::caption(alt));
                }
                Ok(())
            }
            Err(e) if self.options.error_mode == ErrorMode::Strict => Err(e),
            Err(e) => {
                log::warn!("Dropping image reference {}: {}", raw_path, e);
                self.report.missing_images.push(path);
                Ok(())
            }
        }
    }

    fn flush_code(&mut self) {
        if self.state.code_lines.is_empty() {
            return;
        }
        let lines = std::mem::take(&mut self.state.code_lines);
        self.elements.push(Element::code_block(lines));
    }

    fn flush_bullets(&mut self) {
        if self.state.bullet_items.is_empty() {
            return;
        }
        let items = std::mem::take(&mut self.state.bullet_items);
        self.elements.push(Element::BulletList { items });
    }
}

impl Default for DocumentParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(lines: &[&str]) -> Vec<Element> {
        DocumentParser::new()
            .parse_lines(lines.iter().copied())
            .unwrap()
            .document
            .elements
    }

    #[test]
    fn test_plain_lines_and_blanks() {
        let elements = parse(&["first", "", "second", "third"]);
        assert_eq!(
            elements,
            vec![
                Element::paragraph("first"),
                Element::Spacer,
                Element::paragraph("second"),
                Element::paragraph("third"),
            ]
        );
    }

    #[test]
    fn test_fenced_block() {
        let elements = parse(&["```", "x=1", "y=2", "```"]);
        assert_eq!(elements, vec![Element::code_block(["x=1", "y=2"])]);
    }

    #[test]
    fn test_fence_keeps_markup_verbatim() {
        let elements = parse(&["```sql", "# not a heading", "- not a bullet", "", "```"]);
        assert_eq!(
            elements,
            vec![Element::CodeBlock {
                text: "# not a heading\n- not a bullet\n".to_string()
            }]
        );
    }

    #[test]
    fn test_horizontal_rule_dropped_even_in_code() {
        let elements = parse(&["---", "```", "a", "---", "b", "```"]);
        assert_eq!(elements, vec![Element::code_block(["a", "b"])]);
    }

    #[test]
    fn test_empty_fence_produces_nothing() {
        assert!(parse(&["```", "```"]).is_empty());
    }

    #[test]
    fn test_unterminated_fence() {
        let outcome = DocumentParser::new()
            .parse_lines(["intro", "```", "a", "", "b"])
            .unwrap();
        assert!(outcome.report.unterminated_fence);
        assert_eq!(
            outcome.document.elements,
            vec![
                Element::paragraph("intro"),
                Element::CodeBlock {
                    text: "a\n\nb".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_bullets_flushed_before_next_line() {
        let elements = parse(&["- a", "- b", "- c", "after"]);
        assert_eq!(
            elements,
            vec![
                Element::bullet_list(["a", "b", "c"]),
                Element::paragraph("after"),
            ]
        );
    }

    #[test]
    fn test_bullets_flushed_before_spacer() {
        let elements = parse(&["- a", "", "- b"]);
        assert_eq!(
            elements,
            vec![
                Element::bullet_list(["a"]),
                Element::Spacer,
                Element::bullet_list(["b"]),
            ]
        );
    }

    #[test]
    fn test_fence_flushes_bullets() {
        let elements = parse(&["- a", "```", "code", "```"]);
        assert_eq!(
            elements,
            vec![Element::bullet_list(["a"]), Element::code_block(["code"])]
        );
    }

    #[test]
    fn test_horizontal_rule_does_not_split_bullets() {
        let elements = parse(&["- a", "---", "- b"]);
        assert_eq!(elements, vec![Element::bullet_list(["a", "b"])]);
    }

    #[test]
    fn test_end_of_input_flushes_bullets() {
        assert_eq!(parse(&["- only"]), vec![Element::bullet_list(["only"])]);
    }

    #[test]
    fn test_headings() {
        let elements = parse(&["# Title", "### Sub", "#### Deep"]);
        assert_eq!(
            elements,
            vec![
                Element::heading(1, "Title"),
                Element::heading(3, "Sub"),
                Element::heading(4, "Deep"),
            ]
        );
    }

    #[test]
    fn test_missing_image_dropped() {
        let outcome = DocumentParser::new()
            .parse_lines(["![caption](path/that/does/not/exist.png)"])
            .unwrap();
        assert!(outcome.document.is_empty());
        assert_eq!(
            outcome.report.missing_images,
            vec![PathBuf::from("path/that/does/not/exist.png")]
        );
        assert!(outcome.report.has_warnings());
    }

    #[test]
    fn test_missing_image_strict() {
        let result = DocumentParser::with_options(ParseOptions::new().strict())
            .parse_lines(["![caption](missing.png)"]);
        assert!(matches!(result, Err(Error::ImageNotFound(_))));
    }

    #[test]
    fn test_state_between_lines() {
        let mut parser = DocumentParser::new();
        parser.feed("- a").unwrap();
        assert_eq!(parser.state().bullet_items, vec!["a".to_string()]);
        parser.feed("```").unwrap();
        assert_eq!(parser.state().mode, Mode::InCode);
        assert!(parser.state().bullet_items.is_empty());
        assert_eq!(parser.elements(), &[Element::bullet_list(["a"])]);
    }
}
