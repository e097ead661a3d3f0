//! Geometric Primitives and Operations

pub mod layout;
pub mod primitives;

// Re-export commonly used items
pub use layout::{position, DigitLayout, GridShape, CANVAS_SIZE};
pub use primitives::{HexDigit, ShapePrimitive};
