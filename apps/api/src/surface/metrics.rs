//! Static glyph-width tables for the two surface font families.
//!
//! Widths are in em units (relative to font size). This is an approximation of real
//! glyph metrics; it only has to be stable, because the same numbers size every box
//! in the layout and therefore the rasterized height.
//! Tables cover ASCII 0x20..=0x7E (95 printable characters). Index = (char as usize) - 32.

use serde::{Deserialize, Serialize};

/// Bold glyphs are this much wider than regular ones.
const BOLD_FACTOR: f32 = 1.06;
const LIGHT_FACTOR: f32 = 0.97;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontFamily {
    /// Modern and minimal templates.
    #[default]
    Sans,
    /// Classic template.
    Serif,
}

impl FontFamily {
    /// CSS-style font stack handed to the SVG rasterizer.
    pub fn font_stack(self) -> &'static str {
        match self {
            FontFamily::Sans => "Inter, Helvetica, Arial, DejaVu Sans, sans-serif",
            FontFamily::Serif => "EB Garamond, Georgia, Times New Roman, DejaVu Serif, serif",
        }
    }

    pub fn metrics(self) -> &'static FontMetricTable {
        match self {
            FontFamily::Sans => &SANS_TABLE,
            FontFamily::Serif => &SERIF_TABLE,
        }
    }
}

/// Static character-width table for a font family.
pub struct FontMetricTable {
    widths: [f32; 95],
    /// Fallback width for non-ASCII characters.
    average_char_width: f32,
    space_width: f32,
}

impl FontMetricTable {
    /// Width of `s` in em units at weight 1.0.
    pub fn measure_em(&self, s: &str) -> f32 {
        s.chars()
            .map(|c| {
                let code = c as usize;
                if (32..=126).contains(&code) {
                    self.widths[code - 32]
                } else {
                    self.average_char_width
                }
            })
            .sum()
    }

    /// Width of `s` in pixels at `size_px`.
    pub fn measure_px(&self, s: &str, size_px: f32, weight_factor: f32) -> f32 {
        self.measure_em(s) * size_px * weight_factor
    }

    /// Greedy word-wrap at `max_width_px`. Returns the text of each printed line.
    ///
    /// A single word wider than the line (a long URL, say) is broken between characters.
    /// Blank input yields no lines.
    pub fn wrap(&self, s: &str, size_px: f32, weight_factor: f32, max_width_px: f32) -> Vec<String> {
        let mut lines: Vec<String> = Vec::new();
        let space_w = self.space_width * size_px * weight_factor;

        for paragraph in s.split('\n') {
            let mut current = String::new();
            let mut current_width = 0.0_f32;

            for word in paragraph.split_whitespace() {
                let word_w = self.measure_px(word, size_px, weight_factor);
                if word_w > max_width_px {
                    if !current.is_empty() {
                        lines.push(std::mem::take(&mut current));
                    }
                    let mut pieces = self.break_word(word, size_px, weight_factor, max_width_px);
                    if let Some((last, last_w)) = pieces.pop() {
                        lines.extend(pieces.into_iter().map(|(piece, _)| piece));
                        current = last;
                        current_width = last_w;
                    }
                } else if current.is_empty() {
                    current.push_str(word);
                    current_width = word_w;
                } else if current_width + space_w + word_w > max_width_px {
                    lines.push(std::mem::take(&mut current));
                    current.push_str(word);
                    current_width = word_w;
                } else {
                    current.push(' ');
                    current.push_str(word);
                    current_width += space_w + word_w;
                }
            }
            if !current.is_empty() {
                lines.push(current);
            }
        }
        lines
    }

    /// Splits `word` into runs no wider than `max_width_px`, each at least one character.
    fn break_word(&self, word: &str, size_px: f32, weight_factor: f32, max_width_px: f32) -> Vec<(String, f32)> {
        let mut pieces = Vec::new();
        let mut piece = String::new();
        let mut piece_w = 0.0_f32;
        let mut buf = [0u8; 4];
        for c in word.chars() {
            let w = self.measure_px(c.encode_utf8(&mut buf), size_px, weight_factor);
            if !piece.is_empty() && piece_w + w > max_width_px {
                pieces.push((std::mem::take(&mut piece), piece_w));
                piece_w = 0.0;
            }
            piece.push(c);
            piece_w += w;
        }
        if !piece.is_empty() {
            pieces.push((piece, piece_w));
        }
        pieces
    }
}

pub fn weight_factor(weight: crate::surface::node::FontWeight) -> f32 {
    use crate::surface::node::FontWeight;
    match weight {
        FontWeight::Light => LIGHT_FACTOR,
        FontWeight::Normal => 1.0,
        FontWeight::Bold => BOLD_FACTOR,
    }
}

/// Humanist sans-serif (Inter-like).
static SANS_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
        0.25, 0.30, 0.38, 0.56, 0.56, 0.89, 0.67, 0.22, 0.33, 0.33, 0.39, 0.59, 0.28, 0.33, 0.28, 0.31,
        // 0     1     2     3     4     5     6     7     8     9
        0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56, 0.56,
        // :     ;     <     =     >     ?     @
        0.28, 0.28, 0.59, 0.59, 0.59, 0.50, 1.02,
        // A     B     C     D     E     F     G     H     I     J     K     L     M
        0.67, 0.61, 0.61, 0.67, 0.56, 0.50, 0.67, 0.67, 0.25, 0.39, 0.61, 0.53, 0.78,
        // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
        0.67, 0.72, 0.56, 0.72, 0.61, 0.50, 0.56, 0.67, 0.67, 0.89, 0.61, 0.61, 0.56,
        // [     \     ]     ^     _     `
        0.28, 0.31, 0.28, 0.47, 0.56, 0.34,
        // a     b     c     d     e     f     g     h     i     j     k     l     m
        0.56, 0.56, 0.50, 0.56, 0.56, 0.31, 0.56, 0.56, 0.22, 0.22, 0.53, 0.22, 0.83,
        // n     o     p     q     r     s     t     u     v     w     x     y     z
        0.56, 0.56, 0.56, 0.56, 0.33, 0.44, 0.39, 0.56, 0.50, 0.72, 0.50, 0.50, 0.44,
        // {     |     }     ~
        0.33, 0.26, 0.33, 0.59,
    ],
    average_char_width: 0.56,
    space_width: 0.25,
};

/// Old-style serif (Garamond-like). Roughly 85% of the sans widths.
static SERIF_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
        0.21, 0.26, 0.32, 0.48, 0.48, 0.76, 0.57, 0.19, 0.28, 0.28, 0.33, 0.50, 0.24, 0.28, 0.24, 0.26,
        // 0     1     2     3     4     5     6     7     8     9
        0.48, 0.48, 0.48, 0.48, 0.48, 0.48, 0.48, 0.48, 0.48, 0.48,
        // :     ;     <     =     >     ?     @
        0.24, 0.24, 0.50, 0.50, 0.50, 0.43, 0.87,
        // A     B     C     D     E     F     G     H     I     J     K     L     M
        0.57, 0.52, 0.52, 0.57, 0.48, 0.43, 0.57, 0.57, 0.21, 0.33, 0.52, 0.45, 0.66,
        // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
        0.57, 0.61, 0.48, 0.61, 0.52, 0.43, 0.48, 0.57, 0.57, 0.76, 0.52, 0.52, 0.48,
        // [     \     ]     ^     _     `
        0.24, 0.26, 0.24, 0.40, 0.48, 0.29,
        // a     b     c     d     e     f     g     h     i     j     k     l     m
        0.48, 0.48, 0.43, 0.48, 0.48, 0.26, 0.48, 0.48, 0.19, 0.19, 0.45, 0.19, 0.71,
        // n     o     p     q     r     s     t     u     v     w     x     y     z
        0.48, 0.48, 0.48, 0.48, 0.28, 0.37, 0.33, 0.48, 0.43, 0.61, 0.43, 0.43, 0.37,
        // {     |     }     ~
        0.28, 0.22, 0.28, 0.50,
    ],
    average_char_width: 0.48,
    space_width: 0.21,
};
