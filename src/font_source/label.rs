//! Hexadecimal labels shown inside each tofu glyph

use crate::geometry::{GridShape, HexDigit};
use std::fmt;

/// Uppercase hex digits of a code point: four digits up to U+FFFF, six above
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    digits: Vec<HexDigit>,
}

impl Label {
    pub fn new(codepoint: u32) -> Self {
        let len = Self::digit_count(codepoint);
        let digits = (0..len)
            .rev()
            .map(|shift| HexDigit::from_nibble((codepoint >> (4 * shift)) as u8))
            .collect();
        Self { digits }
    }

    /// The label as a string, e.g. `0041` or `01F600`
    pub fn format(codepoint: u32) -> String {
        if codepoint > 0xFFFF {
            format!("{codepoint:06X}")
        } else {
            format!("{codepoint:04X}")
        }
    }

    fn digit_count(codepoint: u32) -> usize {
        if codepoint > 0xFFFF {
            6
        } else {
            4
        }
    }

    pub fn digits(&self) -> &[HexDigit] {
        &self.digits
    }

    pub fn len(&self) -> usize {
        self.digits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    pub fn grid(&self) -> GridShape {
        GridShape::for_digits(self.len())
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for digit in &self.digits {
            write!(f, "{}", digit.to_char())?;
        }
        Ok(())
    }
}
