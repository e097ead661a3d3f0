//! Conversion of generated documents into UFO sources

pub mod conversions;
pub mod ufo;

pub use conversions::bezpath_to_contours;
pub use ufo::{load_ufo_from_path, save_ufo};
