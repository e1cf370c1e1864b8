//! Text measurement and line wrapping.
//!
//! Widths come from the standard Helvetica AFM tables (units per 1000 em).
//! Sizes are in points, widths in millimetres.

use crate::report::draw::FontStyle;

const PT_TO_MM: f64 = 25.4 / 72.0;

/// Width used for characters outside the printable ASCII tables.
const FALLBACK_WIDTH: u16 = 556;

/// Text-measuring capability of a rendering surface.
pub trait TextMeasure {
    /// Advance width of `text` in millimetres.
    fn text_width(&self, text: &str, font: FontStyle, size_pt: f64) -> f64;

    /// Split `text` into lines no wider than `max_width`.
    ///
    /// Explicit newlines start a new line; words longer than the whole width
    /// are broken between characters. Blank text yields no lines.
    fn wrap(&self, text: &str, max_width: f64, font: FontStyle, size_pt: f64) -> Vec<String> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let fits = |s: &str| self.text_width(s, font, size_pt) <= max_width;
        let mut lines = Vec::new();

        for paragraph in text.split('\n') {
            let mut current = String::new();

            for word in paragraph.split_whitespace() {
                let candidate = if current.is_empty() {
                    word.to_string()
                } else {
                    format!("{} {}", current, word)
                };

                if fits(&candidate) {
                    current = candidate;
                    continue;
                }

                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }

                if fits(word) {
                    current = word.to_string();
                } else {
                    // Hard-break an oversized word; the tail stays open for the next word
                    for ch in word.chars() {
                        current.push(ch);
                        if !fits(&current) && current.chars().count() > 1 {
                            current.pop();
                            lines.push(std::mem::take(&mut current));
                            current.push(ch);
                        }
                    }
                }
            }

            lines.push(current);
        }

        lines
    }
}

/// Metrics for the builtin Helvetica family.
#[derive(Debug, Clone, Copy, Default)]
pub struct HelveticaMetrics;

impl HelveticaMetrics {
    pub fn char_width(ch: char, font: FontStyle) -> u16 {
        let table = match font {
            FontStyle::Bold => &HELVETICA_BOLD,
            // Oblique shares the upright widths
            FontStyle::Normal | FontStyle::Italic => &HELVETICA,
        };
        let code = ch as u32;
        if (32..=126).contains(&code) {
            table[(code - 32) as usize]
        } else {
            FALLBACK_WIDTH
        }
    }
}

impl TextMeasure for HelveticaMetrics {
    fn text_width(&self, text: &str, font: FontStyle, size_pt: f64) -> f64 {
        let units: u32 = text
            .chars()
            .map(|ch| u32::from(Self::char_width(ch, font)))
            .sum();
        f64::from(units) / 1000.0 * size_pt * PT_TO_MM
    }
}

// ============================================================================
// AFM WIDTHS, characters 32 (space) through 126 (~)
// ============================================================================

static HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' ' - '/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0' - '9'
    278, 278, 584, 584, 584, 556, 1015, // ':' - '@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A' - 'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N' - 'Z'
    278, 278, 278, 469, 556, 333, // '[' - '`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a' - 'm'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n' - 'z'
    334, 260, 334, 584, // '{' - '~'
];

static HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' ' - '/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0' - '9'
    333, 333, 584, 584, 584, 611, 975, // ':' - '@'
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, // 'A' - 'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N' - 'Z'
    333, 278, 333, 584, 556, 333, // '[' - '`'
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, // 'a' - 'm'
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, // 'n' - 'z'
    389, 280, 389, 584, // '{' - '~'
];

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_width_scales_with_size() {
        let m = HelveticaMetrics;
        // "0" is 556 units: at 10pt = 5.56pt = 1.9614mm
        assert_relative_eq!(m.text_width("0", FontStyle::Normal, 10.0), 5.56 * PT_TO_MM, epsilon = 1e-9);
        assert_relative_eq!(
            m.text_width("00", FontStyle::Normal, 20.0),
            4.0 * m.text_width("0", FontStyle::Normal, 10.0),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_bold_is_wider() {
        let m = HelveticaMetrics;
        let text = "Treatment Recommendations";
        assert!(m.text_width(text, FontStyle::Bold, 14.0) > m.text_width(text, FontStyle::Normal, 14.0));
    }

    #[test]
    fn test_wrap_respects_width() {
        let m = HelveticaMetrics;
        let text = "A fungal disease causing orange to brown pustules on leaves, reducing photosynthesis.";
        let lines = m.wrap(text, 40.0, FontStyle::Normal, 10.0);

        assert!(lines.len() > 1);
        for line in &lines {
            assert!(m.text_width(line, FontStyle::Normal, 10.0) <= 40.0, "too wide: {}", line);
        }
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn test_wrap_short_text_is_one_line() {
        let lines = HelveticaMetrics.wrap("1. t1", 75.0, FontStyle::Normal, 10.0);
        assert_eq!(lines, vec!["1. t1".to_string()]);
    }

    #[test]
    fn test_wrap_blank_text_is_empty() {
        assert!(HelveticaMetrics.wrap("", 75.0, FontStyle::Normal, 10.0).is_empty());
        assert!(HelveticaMetrics.wrap("   ", 75.0, FontStyle::Normal, 10.0).is_empty());
    }

    #[test]
    fn test_wrap_breaks_oversized_word() {
        let word = "W".repeat(40);
        let lines = HelveticaMetrics.wrap(&word, 20.0, FontStyle::Normal, 10.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
    }

    #[test]
    fn test_wrap_keeps_explicit_newlines() {
        let lines = HelveticaMetrics.wrap("first\nsecond", 100.0, FontStyle::Normal, 10.0);
        assert_eq!(lines, vec!["first".to_string(), "second".to_string()]);
    }
}
