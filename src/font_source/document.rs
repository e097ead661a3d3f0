//! Font documents and the composite glyphs they hold

use super::label::Label;
use super::metrics::DocumentInfo;
use crate::geometry::ShapePrimitive;
use crate::ranges::CodepointRange;
use kurbo::Vec2;

/// Highest number of glyph ids a single font can address
pub const MAX_GLYPH_IDS: usize = 65535;
/// Composite glyphs that fit next to the reserved shape primitives
pub const DOCUMENT_CAPACITY: usize = MAX_GLYPH_IDS - ShapePrimitive::COUNT;

/// A reference to a shared shape, placed by translation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeReference {
    pub shape: ShapePrimitive,
    pub offset: Vec2,
}

/// One tofu glyph: a frame plus one digit reference per label character
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphDefinition {
    pub id: u16,
    pub codepoint: u32,
    pub label: Label,
    pub references: Vec<ShapeReference>,
    pub advance_width: f64,
}

impl GlyphDefinition {
    /// AGL style name: `uni0041` in the BMP, `u1F600` above
    pub fn glyph_name(&self) -> String {
        if self.codepoint > 0xFFFF {
            format!("u{:X}", self.codepoint)
        } else {
            format!("uni{:04X}", self.codepoint)
        }
    }

    /// The character to map, if the code point is a Unicode scalar value
    pub fn character(&self) -> Option<char> {
        char::from_u32(self.codepoint)
    }
}

/// An ordered run of composite glyphs destined for one font file
#[derive(Debug, Clone)]
pub struct FontDocument {
    index: usize,
    info: DocumentInfo,
    glyphs: Vec<GlyphDefinition>,
    coverage: Vec<CodepointRange>,
    next_id: u16,
}

impl FontDocument {
    pub fn new(index: usize, info: DocumentInfo) -> Self {
        Self {
            index,
            info,
            glyphs: Vec::new(),
            coverage: Vec::new(),
            next_id: ShapePrimitive::COUNT as u16,
        }
    }

    /// Position of this document within its run
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn info(&self) -> &DocumentInfo {
        &self.info
    }

    /// The shared shapes every document defines once, in glyph id order
    pub fn primitives(&self) -> impl Iterator<Item = ShapePrimitive> {
        ShapePrimitive::all()
    }

    pub fn glyphs(&self) -> &[GlyphDefinition] {
        &self.glyphs
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.glyphs.len() >= DOCUMENT_CAPACITY
    }

    /// Id the next composite glyph will receive
    pub fn next_glyph_id(&self) -> u16 {
        self.next_id
    }

    pub fn first_codepoint(&self) -> Option<u32> {
        self.glyphs.first().map(|glyph| glyph.codepoint)
    }

    pub fn last_codepoint(&self) -> Option<u32> {
        self.glyphs.last().map(|glyph| glyph.codepoint)
    }

    /// Disjoint ranges of the code points added so far
    pub fn coverage(&self) -> &[CodepointRange] {
        &self.coverage
    }

    /// File name stem built from the covered ranges
    pub fn name_stem(&self) -> String {
        let tokens: Vec<String> = self
            .coverage
            .iter()
            .map(CodepointRange::name_token)
            .collect();
        format!("tofu_{}", tokens.join("_"))
    }

    /// Append a glyph composed with [`Self::next_glyph_id`]
    ///
    /// Callers must check [`Self::is_full`] first.
    pub(crate) fn push(&mut self, glyph: GlyphDefinition) {
        debug_assert_eq!(glyph.id, self.next_id);
        debug_assert!(!self.is_full());

        let codepoint = glyph.codepoint;
        let extended = self
            .coverage
            .last_mut()
            .is_some_and(|range| range.try_extend(codepoint));
        if !extended {
            if let Ok(range) = CodepointRange::single(codepoint) {
                self.coverage.push(range);
            }
        }

        self.glyphs.push(glyph);
        self.next_id = self.next_id.saturating_add(1);
    }
}
