//! Build manifest written next to the packaged output

use super::naming::{write_with_fallback, FALLBACK_STEM};
use crate::core::errors::Result;
use crate::font_source::FontDocument;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// What a single document contributed to the build
#[derive(Debug, Clone, Serialize)]
pub struct StagedDocument {
    pub index: usize,
    pub coverage: Vec<String>,
    pub glyph_count: usize,
    pub first_glyph_id: Option<u16>,
    pub last_glyph_id: Option<u16>,
    /// Glyphs generated without a character mapping
    pub unmapped: usize,
    pub source: PathBuf,
    pub binary: Option<PathBuf>,
}

impl StagedDocument {
    pub fn describe(document: &FontDocument, source: PathBuf, binary: Option<PathBuf>) -> Self {
        Self {
            index: document.index(),
            coverage: document.coverage().iter().map(ToString::to_string).collect(),
            glyph_count: document.len(),
            first_glyph_id: document.glyphs().first().map(|glyph| glyph.id),
            last_glyph_id: document.glyphs().last().map(|glyph| glyph.id),
            unmapped: document.unmapped_count(),
            source,
            binary,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BuildManifest {
    pub generated: DateTime<Utc>,
    pub family: String,
    pub outputs: Vec<PathBuf>,
    pub documents: Vec<StagedDocument>,
}

impl BuildManifest {
    pub fn new(family: impl Into<String>, outputs: Vec<PathBuf>, documents: Vec<StagedDocument>) -> Self {
        Self {
            generated: Utc::now(),
            family: family.into(),
            outputs,
            documents,
        }
    }

    pub fn total_glyphs(&self) -> usize {
        self.documents.iter().map(|doc| doc.glyph_count).sum()
    }

    /// Write as `<stem>-manifest.json` in `dir`
    pub fn write(&self, dir: &Path, stem: &str) -> Result<PathBuf> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        write_with_fallback(
            dir,
            &format!("{stem}-manifest.json"),
            &format!("{FALLBACK_STEM}-manifest.json"),
            |path| fs::write(path, &json),
        )
    }
}
