//! Digit grid layout
//!
//! Digits are centered on a small reference canvas, one axis at a time.
//! Everything here works in canvas units with y growing upwards; the
//! conversion to glyph units happens through the canvas transform in
//! [`crate::font_source::metrics`].

use super::primitives::{DIGIT_HEIGHT, DIGIT_WIDTH};
use kurbo::Point;

/// Side length of the square reference canvas
pub const CANVAS_SIZE: f64 = 17.0;
/// Gap between neighbouring digits on both axes
pub const DIGIT_SPACING: f64 = 1.0;

/// Offset of the `index`-th of `count` items centered within `canvas_size`
///
/// With `axis_reversed` the index is counted from the far end, which is how
/// rows map onto a y-up axis.
pub fn position(
    index: usize,
    count: usize,
    item_size: f64,
    spacing: f64,
    canvas_size: f64,
    axis_reversed: bool,
) -> f64 {
    let index = if axis_reversed {
        count - index - 1
    } else {
        index
    };
    let pitch = item_size + spacing;
    let extent = count as f64 * pitch - spacing;
    (canvas_size - extent) / 2.0 + index as f64 * pitch
}

/// Columns and rows of the digit grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridShape {
    pub cols: usize,
    pub rows: usize,
}

impl GridShape {
    /// Grid for a label of `digits` characters: 2×2 for four, 3×2 for six
    pub fn for_digits(digits: usize) -> Self {
        if digits > 4 {
            Self { cols: 3, rows: 2 }
        } else {
            Self { cols: 2, rows: 2 }
        }
    }

    pub fn slots(&self) -> usize {
        self.cols * self.rows
    }
}

/// Sizes used to place digit cells on the canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DigitLayout {
    pub canvas_size: f64,
    pub digit_width: f64,
    pub digit_height: f64,
    pub spacing: f64,
}

impl Default for DigitLayout {
    fn default() -> Self {
        Self {
            canvas_size: CANVAS_SIZE,
            digit_width: DIGIT_WIDTH,
            digit_height: DIGIT_HEIGHT,
            spacing: DIGIT_SPACING,
        }
    }
}

impl DigitLayout {
    /// Bottom-left corner of slot `index`, filled row-major from the top
    pub fn slot_origin(&self, grid: GridShape, index: usize) -> Point {
        let col = index % grid.cols;
        let row = index / grid.cols;
        Point::new(
            position(
                col,
                grid.cols,
                self.digit_width,
                self.spacing,
                self.canvas_size,
                false,
            ),
            position(
                row,
                grid.rows,
                self.digit_height,
                self.spacing,
                self.canvas_size,
                true,
            ),
        )
    }

    pub fn slot_origins(&self, grid: GridShape) -> Vec<Point> {
        (0..grid.slots())
            .map(|index| self.slot_origin(grid, index))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_item_is_centered() {
        assert_eq!(position(0, 1, 32.0, 32.0, 94.0, false), 31.0);
        assert_eq!(position(0, 1, 32.0, 32.0, 94.0, true), 31.0);
    }

    #[test]
    fn test_two_items_are_symmetric() {
        let first = position(0, 2, 32.0, 32.0, 94.0, false);
        let second = position(1, 2, 32.0, 32.0, 94.0, false);
        assert_eq!(second - first, 64.0);
        // Left edge of the first mirrors the right edge of the second
        assert_eq!(first + (second + 32.0), 94.0);
    }

    #[test]
    fn test_wide_pitch_positions() {
        let offsets: Vec<f64> = (0..2)
            .map(|i| position(i, 2, 16.0, 48.0, 94.0, false))
            .collect();
        assert_eq!(offsets, vec![7.0, 71.0]);
    }

    #[test]
    fn test_reversed_axis() {
        assert_eq!(
            position(0, 2, 16.0, 48.0, 94.0, true),
            position(1, 2, 16.0, 48.0, 94.0, false)
        );
    }

    #[test]
    fn test_grid_shapes() {
        assert_eq!(GridShape::for_digits(4), GridShape { cols: 2, rows: 2 });
        assert_eq!(GridShape::for_digits(6), GridShape { cols: 3, rows: 2 });
    }

    #[test]
    fn test_four_digit_slots() {
        let layout = DigitLayout::default();
        let origins = layout.slot_origins(GridShape::for_digits(4));
        assert_eq!(
            origins,
            vec![
                Point::new(5.0, 9.0),
                Point::new(9.0, 9.0),
                Point::new(5.0, 3.0),
                Point::new(9.0, 3.0),
            ]
        );
    }

    #[test]
    fn test_six_digit_slots() {
        let layout = DigitLayout::default();
        let origins = layout.slot_origins(GridShape::for_digits(6));
        let xs: Vec<f64> = origins.iter().take(3).map(|p| p.x).collect();
        assert_eq!(xs, vec![3.0, 7.0, 11.0]);
        assert!(origins[..3].iter().all(|p| p.y == 9.0));
        assert!(origins[3..].iter().all(|p| p.y == 3.0));
    }

    #[test]
    fn test_slots_stay_inside_frame() {
        let layout = DigitLayout::default();
        for digits in [4, 6] {
            for origin in layout.slot_origins(GridShape::for_digits(digits)) {
                assert!(origin.x >= 2.0 && origin.x + DIGIT_WIDTH <= 15.0);
                assert!(origin.y >= 2.0 && origin.y + DIGIT_HEIGHT <= 15.0);
            }
        }
    }
}
