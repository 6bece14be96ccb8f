//! Standard PDF base fonts: names, advance widths and text encoding.

use pdf_writer::Name;

/// Advance widths (1/1000 em) of Helvetica for ASCII 32..=126.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0..9
    278, 278, 584, 584, 584, 556, 1015, // :..@
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // A..M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N..Z
    278, 278, 278, 469, 556, 333, // [..`
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // a..m
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // n..z
    334, 260, 334, 584, // {..~
];

/// Advance widths (1/1000 em) of Helvetica-Bold for ASCII 32..=126.
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0..9
    333, 333, 584, 584, 584, 611, 975, // :..@
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, // A..M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N..Z
    333, 278, 333, 584, 556, 333, // [..`
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, // a..m
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, // n..z
    389, 280, 389, 584, // {..~
];

/// Width used for characters outside the tables.
const FALLBACK_WIDTH: u16 = 556;

/// One of the standard Type1 fonts used by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Font {
    /// Body text
    Helvetica,
    /// Headings
    HelveticaBold,
    /// Captions
    HelveticaOblique,
    /// Code
    Courier,
}

impl Font {
    /// All fonts, in resource order.
    pub const ALL: [Font; 4] = [
        Font::Helvetica,
        Font::HelveticaBold,
        Font::HelveticaOblique,
        Font::Courier,
    ];

    /// PostScript name of the base font.
    pub fn base_font(self) -> Name<'static> {
        match self {
            Font::Helvetica => Name(b"Helvetica"),
            Font::HelveticaBold => Name(b"Helvetica-Bold"),
            Font::HelveticaOblique => Name(b"Helvetica-Oblique"),
            Font::Courier => Name(b"Courier"),
        }
    }

    /// Name of the font in page resource dictionaries.
    pub fn resource_name(self) -> Name<'static> {
        match self {
            Font::Helvetica => Name(b"F1"),
            Font::HelveticaBold => Name(b"F2"),
            Font::HelveticaOblique => Name(b"F3"),
            Font::Courier => Name(b"F4"),
        }
    }

    /// Advance width of a character in 1/1000 em.
    pub fn char_width(self, c: char) -> u16 {
        if self == Font::Courier {
            return 600;
        }
        let table = match self {
            Font::HelveticaBold => &HELVETICA_BOLD_WIDTHS,
            _ => &HELVETICA_WIDTHS,
        };
        match c as u32 {
            code @ 32..=126 => table[(code - 32) as usize],
            _ => FALLBACK_WIDTH,
        }
    }

    /// Width of `text` in points at `size`.
    pub fn text_width(self, text: &str, size: f32) -> f32 {
        let units: u32 = text.chars().map(|c| self.char_width(c) as u32).sum();
        units as f32 * size / 1000.0
    }
}

/// Encode text for a WinAnsiEncoding font.
///
/// Characters with no WinAnsi code point become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c as u32 {
            0x20..=0x7E | 0xA0..=0xFF => c as u8,
            _ => win_ansi_special(c).unwrap_or(b'?'),
        })
        .collect()
}

fn win_ansi_special(c: char) -> Option<u8> {
    let byte = match c {
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8A,
        '‹' => 0x8B,
        'Œ' => 0x8C,
        'Ž' => 0x8E,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9A,
        '›' => 0x9B,
        'œ' => 0x9C,
        'ž' => 0x9E,
        'Ÿ' => 0x9F,
        '\t' => b' ',
        _ => return None,
    };
    Some(byte)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_courier_is_monospaced() {
        assert_eq!(Font::Courier.text_width("abc", 10.0), 18.0);
        assert_eq!(Font::Courier.text_width("WWW", 10.0), 18.0);
    }

    #[test]
    fn test_helvetica_widths() {
        assert_eq!(Font::Helvetica.char_width(' '), 278);
        assert_eq!(Font::Helvetica.char_width('W'), 944);
        assert_eq!(Font::Helvetica.char_width('~'), 584);
        assert_eq!(Font::HelveticaBold.char_width('a'), 556);
        assert_eq!(Font::HelveticaBold.char_width('b'), 611);
        assert_eq!(Font::HelveticaOblique.char_width('i'), 222);
    }

    #[test]
    fn test_text_width_scales_with_size() {
        let w10 = Font::Helvetica.text_width("Report", 10.0);
        let w20 = Font::Helvetica.text_width("Report", 20.0);
        assert!((w20 - 2.0 * w10).abs() < 1e-4);
    }

    #[test]
    fn test_encode_win_ansi() {
        assert_eq!(encode_win_ansi("abc"), b"abc".to_vec());
        assert_eq!(encode_win_ansi("café"), vec![b'c', b'a', b'f', 0xE9]);
        assert_eq!(encode_win_ansi("“x” – •"), vec![0x93, b'x', 0x94, b' ', 0x96, b' ', 0x95]);
        assert_eq!(encode_win_ansi("한"), b"?".to_vec());
    }

    #[test]
    fn test_resource_names_are_distinct() {
        let names: std::collections::HashSet<_> =
            Font::ALL.iter().map(|f| f.resource_name().0).collect();
        assert_eq!(names.len(), Font::ALL.len());
    }
}
