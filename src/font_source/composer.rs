//! Composite glyph assembly

use super::document::{GlyphDefinition, ShapeReference};
use super::label::Label;
use super::metrics::TofuMetrics;
use crate::geometry::{DigitLayout, ShapePrimitive};
use kurbo::{Affine, Vec2};

/// Builds tofu glyph definitions out of references to the shared shapes
#[derive(Debug, Clone)]
pub struct GlyphComposer {
    layout: DigitLayout,
    metrics: TofuMetrics,
    transform: Affine,
}

impl Default for GlyphComposer {
    fn default() -> Self {
        Self::new(DigitLayout::default(), TofuMetrics::default())
    }
}

impl GlyphComposer {
    pub fn new(layout: DigitLayout, metrics: TofuMetrics) -> Self {
        Self {
            layout,
            metrics,
            transform: metrics.canvas_transform(),
        }
    }

    pub fn metrics(&self) -> &TofuMetrics {
        &self.metrics
    }

    /// Compose the glyph for `codepoint` under glyph id `id`
    ///
    /// The frame comes first at the identity position, followed by one digit
    /// reference per label character in reading order.
    pub fn compose(&self, id: u16, codepoint: u32) -> GlyphDefinition {
        let label = Label::new(codepoint);
        let grid = label.grid();

        let mut references = Vec::with_capacity(label.len() + 1);
        references.push(ShapeReference {
            shape: ShapePrimitive::Frame,
            offset: Vec2::ZERO,
        });
        for (index, digit) in label.digits().iter().enumerate() {
            let origin = self.transform * self.layout.slot_origin(grid, index);
            references.push(ShapeReference {
                shape: ShapePrimitive::Digit(*digit),
                offset: origin.to_vec2(),
            });
        }

        GlyphDefinition {
            id,
            codepoint,
            label,
            references,
            advance_width: self.metrics.advance_width(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::HexDigit;

    #[test]
    fn test_compose_four_digit_glyph() {
        let composer = GlyphComposer::default();
        let glyph = composer.compose(17, 0x41);

        assert_eq!(glyph.id, 17);
        assert_eq!(glyph.label.to_string(), "0041");
        assert_eq!(glyph.references.len(), 5);
        assert_eq!(glyph.references[0].shape, ShapePrimitive::Frame);
        assert_eq!(glyph.references[0].offset, Vec2::ZERO);

        let shapes: Vec<ShapePrimitive> = glyph.references[1..].iter().map(|r| r.shape).collect();
        assert_eq!(
            shapes,
            vec![
                ShapePrimitive::Digit(HexDigit::Zero),
                ShapePrimitive::Digit(HexDigit::Zero),
                ShapePrimitive::Digit(HexDigit::Four),
                ShapePrimitive::Digit(HexDigit::One),
            ]
        );
    }

    #[test]
    fn test_compose_six_digit_glyph() {
        let composer = GlyphComposer::default();
        let glyph = composer.compose(42, 0x1F600);
        assert_eq!(glyph.references.len(), 7);
        assert_eq!(glyph.label.to_string(), "01F600");
    }

    #[test]
    fn test_digit_offsets_in_glyph_units() {
        let composer = GlyphComposer::default();
        let scale = composer.metrics().scale();
        let descender = composer.metrics().descender;
        let glyph = composer.compose(17, 0xABCD);

        // Top-left digit sits at canvas (5, 9)
        let offset = glyph.references[1].offset;
        assert!((offset.x - 5.0 * scale).abs() < 1e-9);
        assert!((offset.y - (9.0 * scale + descender)).abs() < 1e-9);

        // Bottom row sits below the top row
        assert!(glyph.references[3].offset.y < glyph.references[1].offset.y);
        assert_eq!(glyph.references[3].offset.x, glyph.references[1].offset.x);
    }

    #[test]
    fn test_advance_width_is_never_zero() {
        let glyph = GlyphComposer::default().compose(17, 0x0300);
        assert_eq!(glyph.advance_width, 1000.0);
    }
}
