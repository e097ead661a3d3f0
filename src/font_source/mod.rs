//! Font source data structures
//!
//! This module contains everything that describes the fonts being generated:
//! hex labels, composite glyph definitions, the documents that hold them and
//! the builder that splits a code point stream into documents.

pub mod builder;
pub mod composer;
pub mod document;
pub mod label;
pub mod metrics;

// Explicit re-exports for public API
pub use builder::{
    BuilderState, DocumentSink, FontBuilder, SplitPolicy, DEFAULT_SPLIT_SIZE, MIN_SPLIT_SIZE,
};
pub use composer::GlyphComposer;
pub use document::{
    FontDocument, GlyphDefinition, ShapeReference, DOCUMENT_CAPACITY, MAX_GLYPH_IDS,
};
pub use label::Label;
pub use metrics::{DocumentInfo, TofuMetrics};
