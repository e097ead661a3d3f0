//! The 17 shared shape primitives
//!
//! Every tofu glyph is assembled from one hollow frame plus one digit shape
//! per hexadecimal digit. The shapes live once per document and composite
//! glyphs only reference them.
//!
//! Outlines are drawn on a unit grid with y growing downwards, the same way
//! they read on screen, and flipped into y-up glyph space when built.

use kurbo::{Affine, BezPath, Point};

/// Width of a digit cell in canvas units
pub const DIGIT_WIDTH: f64 = 3.0;
/// Height of a digit cell in canvas units
pub const DIGIT_HEIGHT: f64 = 5.0;

type Polygon = &'static [(u8, u8)];

const FRAME: &[Polygon] = &[
    &[(1, 1), (1, 16), (16, 16), (16, 1)],
    &[(2, 2), (15, 2), (15, 15), (2, 15)],
];

const DIGIT_0: &[Polygon] = &[
    &[(0, 0), (0, 5), (3, 5), (3, 0)],
    &[(1, 1), (2, 1), (2, 4), (1, 4)],
];
const DIGIT_1: &[Polygon] = &[&[
    (0, 0),
    (0, 1),
    (1, 1),
    (1, 4),
    (0, 4),
    (0, 5),
    (3, 5),
    (3, 4),
    (2, 4),
    (2, 0),
]];
const DIGIT_2: &[Polygon] = &[&[
    (0, 0),
    (0, 1),
    (2, 1),
    (2, 2),
    (0, 2),
    (0, 5),
    (3, 5),
    (3, 4),
    (1, 4),
    (1, 3),
    (3, 3),
    (3, 0),
]];
const DIGIT_3: &[Polygon] = &[&[
    (0, 0),
    (0, 1),
    (2, 1),
    (2, 2),
    (0, 2),
    (0, 3),
    (2, 3),
    (2, 4),
    (0, 4),
    (0, 5),
    (3, 5),
    (3, 0),
]];
const DIGIT_4: &[Polygon] = &[&[
    (0, 0),
    (0, 3),
    (2, 3),
    (2, 5),
    (3, 5),
    (3, 0),
    (2, 0),
    (2, 2),
    (1, 2),
    (1, 0),
]];
const DIGIT_5: &[Polygon] = &[&[
    (0, 0),
    (0, 3),
    (2, 3),
    (2, 4),
    (0, 4),
    (0, 5),
    (3, 5),
    (3, 2),
    (1, 2),
    (1, 1),
    (3, 1),
    (3, 0),
]];
const DIGIT_6: &[Polygon] = &[
    &[
        (0, 0),
        (0, 5),
        (3, 5),
        (3, 2),
        (1, 2),
        (1, 1),
        (3, 1),
        (3, 0),
    ],
    &[(1, 3), (2, 3), (2, 4), (1, 4)],
];
const DIGIT_7: &[Polygon] = &[&[(0, 0), (0, 1), (2, 1), (2, 5), (3, 5), (3, 0)]];
const DIGIT_8: &[Polygon] = &[
    &[(0, 0), (0, 5), (3, 5), (3, 0)],
    &[(1, 1), (2, 1), (2, 2), (1, 2)],
    &[(1, 3), (2, 3), (2, 4), (1, 4)],
];
const DIGIT_9: &[Polygon] = &[
    &[(0, 0), (0, 3), (2, 3), (2, 5), (3, 5), (3, 0)],
    &[(1, 1), (2, 1), (2, 2), (1, 2)],
];
const DIGIT_A: &[Polygon] = &[
    &[
        (0, 0),
        (0, 5),
        (1, 5),
        (1, 3),
        (2, 3),
        (2, 5),
        (3, 5),
        (3, 0),
    ],
    &[(1, 1), (2, 1), (2, 2), (1, 2)],
];
const DIGIT_B: &[Polygon] = &[&[
    (0, 0),
    (0, 5),
    (3, 5),
    (3, 3),
    (2, 3),
    (2, 4),
    (1, 4),
    (1, 3),
    (2, 3),
    (2, 2),
    (1, 2),
    (1, 1),
    (2, 1),
    (2, 2),
    (3, 2),
    (3, 0),
]];
const DIGIT_C: &[Polygon] = &[&[
    (0, 0),
    (0, 5),
    (3, 5),
    (3, 4),
    (1, 4),
    (1, 1),
    (3, 1),
    (3, 0),
]];
const DIGIT_D: &[Polygon] = &[&[
    (0, 0),
    (0, 5),
    (2, 5),
    (2, 4),
    (3, 4),
    (3, 1),
    (2, 1),
    (2, 4),
    (1, 4),
    (1, 1),
    (2, 1),
    (2, 0),
]];
const DIGIT_E: &[Polygon] = &[&[
    (0, 0),
    (0, 5),
    (3, 5),
    (3, 4),
    (1, 4),
    (1, 3),
    (3, 3),
    (3, 2),
    (1, 2),
    (1, 1),
    (3, 1),
    (3, 0),
]];
const DIGIT_F: &[Polygon] = &[&[
    (0, 0),
    (0, 5),
    (1, 5),
    (1, 3),
    (3, 3),
    (3, 2),
    (1, 2),
    (1, 1),
    (3, 1),
    (3, 0),
]];

/// A single hexadecimal digit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum HexDigit {
    Zero,
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    A,
    B,
    C,
    D,
    E,
    F,
}

impl HexDigit {
    pub const ALL: [HexDigit; 16] = [
        HexDigit::Zero,
        HexDigit::One,
        HexDigit::Two,
        HexDigit::Three,
        HexDigit::Four,
        HexDigit::Five,
        HexDigit::Six,
        HexDigit::Seven,
        HexDigit::Eight,
        HexDigit::Nine,
        HexDigit::A,
        HexDigit::B,
        HexDigit::C,
        HexDigit::D,
        HexDigit::E,
        HexDigit::F,
    ];

    /// The digit for the low four bits of `value`
    pub fn from_nibble(value: u8) -> Self {
        Self::ALL[(value & 0xF) as usize]
    }

    pub fn value(self) -> u8 {
        self as u8
    }

    /// Uppercase character for this digit
    pub fn to_char(self) -> char {
        b"0123456789ABCDEF"[self as usize] as char
    }

    fn polygons(self) -> &'static [Polygon] {
        match self {
            HexDigit::Zero => DIGIT_0,
            HexDigit::One => DIGIT_1,
            HexDigit::Two => DIGIT_2,
            HexDigit::Three => DIGIT_3,
            HexDigit::Four => DIGIT_4,
            HexDigit::Five => DIGIT_5,
            HexDigit::Six => DIGIT_6,
            HexDigit::Seven => DIGIT_7,
            HexDigit::Eight => DIGIT_8,
            HexDigit::Nine => DIGIT_9,
            HexDigit::A => DIGIT_A,
            HexDigit::B => DIGIT_B,
            HexDigit::C => DIGIT_C,
            HexDigit::D => DIGIT_D,
            HexDigit::E => DIGIT_E,
            HexDigit::F => DIGIT_F,
        }
    }
}

/// One of the reusable outlines every tofu glyph is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShapePrimitive {
    /// Hollow square surrounding the digits
    Frame,
    Digit(HexDigit),
}

impl ShapePrimitive {
    /// Number of primitives, which is also the number of reserved glyph ids
    pub const COUNT: usize = 17;

    /// Frame first, then digits `0` through `F`
    pub fn all() -> impl Iterator<Item = ShapePrimitive> {
        std::iter::once(ShapePrimitive::Frame)
            .chain(HexDigit::ALL.into_iter().map(ShapePrimitive::Digit))
    }

    /// Reserved glyph id of this primitive
    pub fn id(self) -> u16 {
        match self {
            ShapePrimitive::Frame => 0,
            ShapePrimitive::Digit(digit) => 1 + digit.value() as u16,
        }
    }

    pub fn glyph_name(self) -> String {
        match self {
            ShapePrimitive::Frame => "tofu.frame".to_string(),
            ShapePrimitive::Digit(digit) => format!("tofu.digit{}", digit.to_char()),
        }
    }

    /// Outline in y-up space, mapped through `transform`
    ///
    /// The frame is drawn on the whole canvas; digits on their own cell with
    /// the origin at the cell's bottom-left corner.
    pub fn outline(self, transform: Affine) -> BezPath {
        let (polygons, height) = match self {
            ShapePrimitive::Frame => (FRAME, super::layout::CANVAS_SIZE),
            ShapePrimitive::Digit(digit) => (digit.polygons(), DIGIT_HEIGHT),
        };

        let mut path = BezPath::new();
        for polygon in polygons {
            for (index, &(x, y)) in polygon.iter().enumerate() {
                let point = Point::new(x as f64, height - y as f64);
                if index == 0 {
                    path.move_to(point);
                } else {
                    path.line_to(point);
                }
            }
            path.close_path();
        }
        path.apply_affine(transform);
        path
    }
}
