//! Error types for the tofu pipeline
//!
//! Every fatal condition the generator can hit is a [`TofuError`]. Advisory
//! notices (auto-corrected ranges, merges, reset split sizes) are logged with
//! `tracing` instead and never surface here.

use std::fmt;
use std::path::PathBuf;

/// Which side of a `START-END` token failed to parse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeSide {
    Start,
    End,
}

impl fmt::Display for RangeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeSide::Start => write!(f, "start"),
            RangeSide::End => write!(f, "end"),
        }
    }
}

/// Broad classification used for reporting and exit handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed user input
    Format,
    /// A value or a document size exceeds what can be represented
    Bounds,
    /// The file system refused an output
    Resource,
    /// The external font toolchain failed
    Toolchain,
}

#[derive(Debug, thiserror::Error)]
pub enum TofuError {
    #[error("invalid hexadecimal {side} value '{value}' in range '{token}'")]
    InvalidHex {
        side: RangeSide,
        value: String,
        token: String,
    },

    #[error("range '{token}' contains more than one '-'")]
    TooManyHyphens { token: String },

    #[error("conflicting inputs: {0}")]
    ConflictingInputs(String),

    #[error("no code point ranges were given")]
    NoInput,

    #[error("code point '{value}' in '{token}' exceeds the maximum U+{max:06X}")]
    CodepointOutOfBounds {
        value: String,
        token: String,
        max: u32,
    },

    #[error("{requested} glyphs exceed the document capacity of {capacity}; use --split")]
    CapacityExceeded { requested: usize, capacity: usize },

    #[error("split size {requested} exceeds the document capacity of {capacity}")]
    SplitTooLarge { requested: usize, capacity: usize },

    #[error("could not write output {}: {source}", path.display())]
    OutputRejected {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} failed: {message}")]
    Toolchain { tool: String, message: String },

    #[error("'{name}' is not a valid glyph name")]
    InvalidGlyphName { name: String },

    #[error("UFO source {}: {message}", path.display())]
    Ufo { path: PathBuf, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl TofuError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TofuError::InvalidHex { .. }
            | TofuError::TooManyHyphens { .. }
            | TofuError::ConflictingInputs(_)
            | TofuError::NoInput
            | TofuError::InvalidGlyphName { .. } => ErrorKind::Format,
            TofuError::CodepointOutOfBounds { .. }
            | TofuError::CapacityExceeded { .. }
            | TofuError::SplitTooLarge { .. } => ErrorKind::Bounds,
            TofuError::OutputRejected { .. } | TofuError::Ufo { .. } | TofuError::Io(_) => {
                ErrorKind::Resource
            }
            TofuError::Toolchain { .. } => ErrorKind::Toolchain,
        }
    }
}

pub type Result<T, E = TofuError> = std::result::Result<T, E>;
