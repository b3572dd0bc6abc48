/// The standard PDF fonts a report can use. They need no embedding:
/// every viewer ships them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BuiltinFont {
    Helvetica,
    HelveticaBold,
}

impl BuiltinFont {
    /// Every font the document writer declares in page resources.
    pub const ALL: [BuiltinFont; 2] = [BuiltinFont::Helvetica, BuiltinFont::HelveticaBold];

    /// Resource name used in content streams (e.g. "F1").
    pub fn pdf_name(&self) -> &'static str {
        match self {
            BuiltinFont::Helvetica => "F1",
            BuiltinFont::HelveticaBold => "F2",
        }
    }

    /// The PDF BaseFont name.
    pub fn pdf_base_name(&self) -> &'static str {
        match self {
            BuiltinFont::Helvetica => "Helvetica",
            BuiltinFont::HelveticaBold => "Helvetica-Bold",
        }
    }
}

/// Helvetica advance widths for ASCII 32..=126, in 1/1000 em (Adobe AFM).
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333,
    389, 584, 278, 333, 278, 278, 556, 556, 556, 556,
    556, 556, 556, 556, 556, 556, 278, 278, 584, 584,
    584, 556, 1015, 667, 667, 722, 722, 667, 611, 778,
    722, 278, 500, 667, 556, 833, 722, 778, 667, 778,
    722, 667, 611, 722, 667, 944, 667, 667, 611, 278,
    278, 278, 469, 556, 333, 556, 556, 500, 556, 556,
    278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500,
    500, 334, 260, 334, 584,
];

/// Helvetica-Bold advance widths for ASCII 32..=126, in 1/1000 em (Adobe AFM).
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333,
    389, 584, 278, 333, 278, 278, 556, 556, 556, 556,
    556, 556, 556, 556, 556, 556, 333, 333, 584, 584,
    584, 611, 975, 722, 722, 722, 722, 667, 611, 778,
    722, 278, 556, 722, 611, 833, 722, 778, 667, 778,
    722, 667, 611, 722, 667, 944, 667, 667, 611, 333,
    278, 333, 584, 556, 333, 556, 611, 556, 611, 556,
    333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556,
    500, 389, 280, 389, 584,
];

/// Helvetica widths for WinAnsi codes 0x80..=0xFF. Unassigned codes use
/// the space width.
const HELVETICA_HIGH_WIDTHS: [u16; 128] = [
    556, 278, 222, 556, 333, 1000, 556, 556, 333, 1000, 667, 333, 1000, 278, 611, 278,
    278, 222, 222, 333, 333, 350, 556, 1000, 333, 1000, 500, 333, 944, 278, 500, 667,
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500,
];

/// Helvetica-Bold widths for WinAnsi codes 0x80..=0xFF.
const HELVETICA_BOLD_HIGH_WIDTHS: [u16; 128] = [
    556, 278, 278, 556, 500, 1000, 556, 556, 333, 1000, 667, 333, 1000, 278, 611, 278,
    278, 278, 278, 500, 500, 350, 556, 1000, 333, 1000, 556, 333, 944, 278, 500, 667,
    278, 333, 556, 556, 556, 556, 280, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    400, 584, 333, 333, 333, 611, 556, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    722, 722, 722, 722, 722, 722, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    556, 556, 556, 556, 556, 556, 889, 556, 556, 556, 556, 556, 278, 278, 278, 278,
    611, 611, 611, 611, 611, 611, 611, 584, 611, 611, 611, 611, 611, 556, 611, 556,
];

/// Characters WinAnsi places in 0x80..=0x9F, where Latin-1 has controls.
const WINANSI_SPECIALS: [(char, u8); 27] = [
    ('\u{20AC}', 0x80),
    ('\u{201A}', 0x82),
    ('\u{0192}', 0x83),
    ('\u{201E}', 0x84),
    ('\u{2026}', 0x85),
    ('\u{2020}', 0x86),
    ('\u{2021}', 0x87),
    ('\u{02C6}', 0x88),
    ('\u{2030}', 0x89),
    ('\u{0160}', 0x8A),
    ('\u{2039}', 0x8B),
    ('\u{0152}', 0x8C),
    ('\u{017D}', 0x8E),
    ('\u{2018}', 0x91),
    ('\u{2019}', 0x92),
    ('\u{201C}', 0x93),
    ('\u{201D}', 0x94),
    ('\u{2022}', 0x95),
    ('\u{2013}', 0x96),
    ('\u{2014}', 0x97),
    ('\u{02DC}', 0x98),
    ('\u{2122}', 0x99),
    ('\u{0161}', 0x9A),
    ('\u{203A}', 0x9B),
    ('\u{0153}', 0x9C),
    ('\u{017E}', 0x9E),
    ('\u{0178}', 0x9F),
];

/// Byte substituted for characters WinAnsi cannot represent.
pub const WINANSI_FALLBACK: u8 = b'?';

/// WinAnsi byte for a character, or `None` if the encoding lacks it.
pub fn winansi_code(ch: char) -> Option<u8> {
    let code = ch as u32;
    match code {
        0x20..=0x7E | 0xA0..=0xFF => Some(code as u8),
        _ => WINANSI_SPECIALS
            .iter()
            .find(|(special, _)| *special == ch)
            .map(|(_, byte)| *byte),
    }
}

/// Metrics for the builtin fonts. Only the PDF surface measures text;
/// layout code works with line heights.
pub struct FontMetrics;

impl FontMetrics {
    /// Width of a character in 1/1000 em units, measured as the glyph the
    /// writer will actually emit for it.
    pub fn char_width(font: BuiltinFont, ch: char) -> u16 {
        Self::code_width(font, winansi_code(ch).unwrap_or(WINANSI_FALLBACK))
    }

    fn code_width(font: BuiltinFont, code: u8) -> u16 {
        let (low, high) = match font {
            BuiltinFont::Helvetica => (&HELVETICA_WIDTHS, &HELVETICA_HIGH_WIDTHS),
            BuiltinFont::HelveticaBold => (&HELVETICA_BOLD_WIDTHS, &HELVETICA_BOLD_HIGH_WIDTHS),
        };
        match code {
            0x20..=0x7E => low[(code - 0x20) as usize],
            0x80..=0xFF => high[(code - 0x80) as usize],
            _ => low[(WINANSI_FALLBACK - 0x20) as usize],
        }
    }

    /// Width of a string in points.
    pub fn measure_text(text: &str, font: BuiltinFont, font_size: f64) -> f64 {
        let total: u32 = text
            .chars()
            .map(|ch| Self::char_width(font, ch) as u32)
            .sum();
        total as f64 * font_size / 1000.0
    }

    /// Line height for a font size (1.2x multiplier).
    pub fn line_height(font_size: f64) -> f64 {
        font_size * 1.2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bold_is_wider_than_regular_for_lowercase() {
        let regular = FontMetrics::measure_text("invoice", BuiltinFont::Helvetica, 10.0);
        let bold = FontMetrics::measure_text("invoice", BuiltinFont::HelveticaBold, 10.0);
        assert!(bold > regular);
    }

    #[test]
    fn measure_scales_with_size() {
        // "0" is 556/1000 em in both faces
        assert_eq!(FontMetrics::measure_text("0", BuiltinFont::Helvetica, 10.0), 5.56);
        assert_eq!(FontMetrics::measure_text("00", BuiltinFont::Helvetica, 20.0), 22.24);
    }

    #[test]
    fn latin1_letters_use_afm_widths() {
        assert_eq!(FontMetrics::char_width(BuiltinFont::Helvetica, 'é'), 556);
        assert_eq!(FontMetrics::char_width(BuiltinFont::HelveticaBold, 'é'), 556);
        assert_eq!(FontMetrics::char_width(BuiltinFont::Helvetica, 'Æ'), 1000);
        assert_eq!(FontMetrics::char_width(BuiltinFont::HelveticaBold, 'ü'), 611);
    }

    #[test]
    fn winansi_specials_map_into_the_0x80_row() {
        assert_eq!(winansi_code('€'), Some(0x80));
        assert_eq!(winansi_code('—'), Some(0x97));
        assert_eq!(winansi_code('ÿ'), Some(0xFF));
        assert_eq!(FontMetrics::char_width(BuiltinFont::Helvetica, '€'), 556);
        assert_eq!(FontMetrics::char_width(BuiltinFont::Helvetica, '—'), 1000);
    }

    #[test]
    fn unmappable_characters_measure_as_the_fallback() {
        assert_eq!(winansi_code('\u{0085}'), None);
        assert_eq!(winansi_code('中'), None);
        assert_eq!(
            FontMetrics::char_width(BuiltinFont::Helvetica, '中'),
            FontMetrics::char_width(BuiltinFont::Helvetica, '?')
        );
    }

    #[test]
    fn resource_names_are_distinct() {
        assert_ne!(
            BuiltinFont::Helvetica.pdf_name(),
            BuiltinFont::HelveticaBold.pdf_name()
        );
        assert_eq!(BuiltinFont::HelveticaBold.pdf_base_name(), "Helvetica-Bold");
    }
}
