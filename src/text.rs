//! Text measurement for hover annotations.

use crate::types::{Px, Size};

/// Proportional character widths in hundredths of the nominal character width,
/// indexed by `c - 0x20` for printable ASCII.
#[rustfmt::skip]
const AW_CHAR: [u8; 95] = [
    45,  55,  62, 115,  90, 132, 125,  40,
    55,  55,  71, 115,  45,  48,  45,  50,
    91,  91,  91,  91,  91,  91,  91,  91,
    91,  91,  50,  50, 120, 120, 120,  78,
   142, 102, 105, 110, 115, 105,  98, 105,
   125,  58,  58, 107,  95, 145, 125, 115,
    95, 115, 107,  95,  97, 118, 102, 150,
   100,  93, 100,  58,  50,  58, 119,  72,
    72,  86,  92,  80,  92,  85,  52,  92,
    92,  47,  47,  88,  48, 135,  92,  86,
    92,  92,  69,  75,  58,  92,  80, 121,
    81,  80,  76,  91,  49,  91, 118,
];

/// Sum of proportional widths (hundredths), non-ASCII counted as 100.
pub fn proportional_text_length(text: &str) -> u32 {
    text.chars()
        .map(|c| {
            if (' '..='~').contains(&c) {
                AW_CHAR[(c as usize) - 0x20] as u32
            } else {
                100
            }
        })
        .sum()
}

/// Font metrics supplied by the host chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    /// Nominal character advance
    pub char_width: Px,
    /// Distance between consecutive baselines
    pub line_height: Px,
}

impl FontMetrics {
    pub const fn new(char_width: f64, line_height: f64) -> Self {
        Self {
            char_width: Px(char_width),
            line_height: Px(line_height),
        }
    }

    /// Measured extent of a single line of text.
    pub fn measure(&self, text: &str) -> Size<Px> {
        let width = proportional_text_length(text) as f64 * self.char_width.0 * 0.01;
        Size::new(Px(width), self.line_height)
    }

    /// Pixel margin kept clear at each end of a hover leader line.
    pub fn margin(&self) -> Px {
        self.line_height / 2.0
    }
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self::new(crate::defaults::CHAR_WIDTH, crate::defaults::LINE_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_share_one_width() {
        assert_eq!(proportional_text_length("0"), 91);
        assert_eq!(proportional_text_length("12.50"), 91 * 4 + 45);
    }

    #[test]
    fn measure_uses_char_width_and_line_height() {
        let font = FontMetrics::new(10.0, 14.0);
        let size = font.measure("00");
        assert!((size.w.0 - 18.2).abs() < 1e-9);
        assert_eq!(size.h, Px(14.0));
        assert_eq!(font.margin(), Px(7.0));
    }

    #[test]
    fn non_ascii_counts_as_full_width() {
        assert_eq!(proportional_text_length("é"), 100);
    }
}
