//! Accumulates tofu glyphs into documents and splits them at a threshold

use super::composer::GlyphComposer;
use super::document::{FontDocument, DOCUMENT_CAPACITY};
use super::metrics::DocumentInfo;
use crate::core::errors::{Result, TofuError};
use crate::ranges::RangeSet;
use tracing::{debug, info, warn};

/// Glyphs per document when splitting without an explicit size
pub const DEFAULT_SPLIT_SIZE: usize = 8192;
/// Split sizes at or below this are replaced by [`DEFAULT_SPLIT_SIZE`]
pub const MIN_SPLIT_SIZE: usize = 64;

/// How glyphs are distributed over documents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitPolicy {
    /// Everything goes into one document
    Single,
    /// A new document starts after every `n` glyphs
    Every(usize),
}

impl SplitPolicy {
    /// Resolve a requested split size
    ///
    /// `None` disables splitting. Sizes that are too small fall back to the
    /// default with a warning; sizes beyond the document capacity are
    /// rejected.
    pub fn from_requested(requested: Option<usize>) -> Result<Self> {
        let Some(size) = requested else {
            return Ok(SplitPolicy::Single);
        };

        if size <= MIN_SPLIT_SIZE {
            warn!(
                "Split size {} must be larger than {}; using {}",
                size, MIN_SPLIT_SIZE, DEFAULT_SPLIT_SIZE
            );
            return Ok(SplitPolicy::Every(DEFAULT_SPLIT_SIZE));
        }

        if size > DOCUMENT_CAPACITY {
            return Err(TofuError::SplitTooLarge {
                requested: size,
                capacity: DOCUMENT_CAPACITY,
            });
        }

        Ok(SplitPolicy::Every(size))
    }

    /// Glyphs per document
    pub fn threshold(&self) -> usize {
        match self {
            SplitPolicy::Single => DOCUMENT_CAPACITY,
            SplitPolicy::Every(size) => *size,
        }
    }

    /// Reject a glyph total that cannot be packed under this policy
    pub fn check_capacity(&self, total: usize) -> Result<()> {
        match self {
            SplitPolicy::Single if total > DOCUMENT_CAPACITY => Err(TofuError::CapacityExceeded {
                requested: total,
                capacity: DOCUMENT_CAPACITY,
            }),
            _ => Ok(()),
        }
    }

    /// Number of documents `total` glyphs will produce
    pub fn document_count(&self, total: usize) -> usize {
        total.div_ceil(self.threshold())
    }
}

/// Receives each document as soon as it is finalized
pub trait DocumentSink {
    fn accept(&mut self, document: FontDocument) -> Result<()>;
}

impl DocumentSink for Vec<FontDocument> {
    fn accept(&mut self, document: FontDocument) -> Result<()> {
        self.push(document);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderState {
    /// No document is open
    Empty,
    /// A document is open and has pending glyphs
    Filling,
}

/// Turns a stream of code points into finalized documents
pub struct FontBuilder<S: DocumentSink> {
    composer: GlyphComposer,
    info: DocumentInfo,
    policy: SplitPolicy,
    sink: S,
    current: Option<FontDocument>,
    pending: usize,
    dirty: bool,
    finalized: usize,
}

impl<S: DocumentSink> FontBuilder<S> {
    pub fn new(composer: GlyphComposer, info: DocumentInfo, policy: SplitPolicy, sink: S) -> Self {
        Self {
            composer,
            info,
            policy,
            sink,
            current: None,
            pending: 0,
            dirty: false,
            finalized: 0,
        }
    }

    pub fn state(&self) -> BuilderState {
        if self.current.is_some() {
            BuilderState::Filling
        } else {
            BuilderState::Empty
        }
    }

    /// Documents handed to the sink so far
    pub fn finalized_count(&self) -> usize {
        self.finalized
    }

    pub fn current_document(&self) -> Option<&FontDocument> {
        self.current.as_ref()
    }

    /// Compose and append the glyph for `codepoint`, returning its glyph id
    pub fn add_codepoint(&mut self, codepoint: u32) -> Result<u16> {
        if self.current.is_none() && self.policy == SplitPolicy::Single && self.finalized > 0 {
            return Err(TofuError::CapacityExceeded {
                requested: DOCUMENT_CAPACITY + 1,
                capacity: DOCUMENT_CAPACITY,
            });
        }

        let index = self.finalized;
        let info = &self.info;
        let document = self.current.get_or_insert_with(|| {
            debug!("Opening document {}", index);
            FontDocument::new(index, info.clone())
        });
        let id = document.next_glyph_id();
        document.push(self.composer.compose(id, codepoint));
        self.pending += 1;
        self.dirty = true;

        if self.pending >= self.policy.threshold() {
            self.finalize()?;
        }
        Ok(id)
    }

    /// Add every code point of `ranges`, checking capacity up front
    pub fn add_range_set(&mut self, ranges: &RangeSet) -> Result<()> {
        self.policy.check_capacity(ranges.len())?;
        for codepoint in ranges.codepoints() {
            self.add_codepoint(codepoint)?;
        }
        Ok(())
    }

    /// Hand the open document to the sink
    ///
    /// Does nothing when no glyphs are pending.
    pub fn finalize(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }

        if let Some(document) = self.current.take() {
            info!(
                "Finalized document {} with {} glyphs ({})",
                document.index(),
                document.len(),
                document
                    .coverage()
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            self.finalized += 1;
            self.pending = 0;
            self.dirty = false;
            self.sink.accept(document)?;
        }
        Ok(())
    }

    /// Flush the last partial document and return the sink
    pub fn finish(mut self) -> Result<S> {
        self.finalize()?;
        Ok(self.sink)
    }
}
