//! Font metrics and naming data
//!
//! This module contains the fixed vertical metrics of a tofu font, the
//! mapping from the reference canvas into glyph units, and the naming
//! metadata written into every document.

use crate::geometry::CANVAS_SIZE;
use chrono::{DateTime, Utc};
use kurbo::{Affine, Vec2};

/// Margin between the glyph edge and the frame, in canvas units
const FRAME_MARGIN: f64 = 1.0;

/// Font metrics for spacing and positioning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TofuMetrics {
    pub units_per_em: f64,
    pub ascender: f64,
    pub descender: f64,
    pub canvas_size: f64,
}

impl Default for TofuMetrics {
    fn default() -> Self {
        Self {
            units_per_em: 1000.0,
            ascender: 800.0,
            descender: -200.0,
            canvas_size: CANVAS_SIZE,
        }
    }
}

impl TofuMetrics {
    /// Glyph units per canvas unit
    pub fn scale(&self) -> f64 {
        self.units_per_em / self.canvas_size
    }

    /// Maps canvas coordinates onto glyph coordinates
    ///
    /// The canvas bottom sits on the descender so the frame spans the full
    /// em vertically.
    pub fn canvas_transform(&self) -> Affine {
        Affine::translate(Vec2::new(0.0, self.descender)) * Affine::scale(self.scale())
    }

    /// Like [`Self::canvas_transform`] without the baseline shift, for shapes
    /// positioned by a component offset
    pub fn cell_transform(&self) -> Affine {
        Affine::scale(self.scale())
    }

    pub fn advance_width(&self) -> f64 {
        self.units_per_em
    }

    /// Space left of and right of the frame
    ///
    /// Keeps every tofu glyph from collapsing to a zero-width box, which some
    /// renderers treat as an invisible combining mark.
    pub fn side_bearing(&self) -> f64 {
        FRAME_MARGIN * self.scale()
    }
}

/// Naming and licensing data shared by every document of a run
#[derive(Debug, Clone)]
pub struct DocumentInfo {
    pub family_name: String,
    pub style_name: String,
    pub version_major: i32,
    pub version_minor: u32,
    pub license: Option<String>,
    pub license_url: Option<String>,
    pub created: DateTime<Utc>,
}

impl Default for DocumentInfo {
    fn default() -> Self {
        Self {
            family_name: "Tofu".to_string(),
            style_name: "Regular".to_string(),
            version_major: 1,
            version_minor: 0,
            license: None,
            license_url: None,
            created: Utc::now(),
        }
    }
}

impl DocumentInfo {
    /// Get a display name combining family and style names
    pub fn display_name(&self) -> String {
        let parts: Vec<&str> = [&self.family_name, &self.style_name]
            .iter()
            .filter(|s| !s.is_empty())
            .map(|s| s.as_str())
            .collect();

        if parts.is_empty() {
            "Untitled Font".to_string()
        } else {
            parts.join(" ")
        }
    }

    /// PostScript name, unique per document through its first code point
    pub fn postscript_name(&self, first_codepoint: Option<u32>) -> String {
        let base: String = format!("{}-{}", self.family_name, self.style_name)
            .chars()
            .filter(|c| c.is_ascii_graphic() && !"[](){}<>/%".contains(*c))
            .collect();
        match first_codepoint {
            Some(codepoint) => format!("{base}-U{codepoint:04X}"),
            None => base,
        }
    }

    /// Convert to norad FontInfo
    pub fn to_norad_font_info(
        &self,
        metrics: &TofuMetrics,
        first_codepoint: Option<u32>,
    ) -> norad::FontInfo {
        let mut info = norad::FontInfo::default();

        // Set family and style names
        if !self.family_name.is_empty() {
            info.family_name = Some(self.family_name.clone());
        }
        if !self.style_name.is_empty() {
            info.style_name = Some(self.style_name.clone());
        }
        info.postscript_font_name = Some(self.postscript_name(first_codepoint));
        info.version_major = Some(self.version_major);
        info.version_minor = Some(self.version_minor);
        info.open_type_name_license = self.license.clone();
        info.open_type_name_license_url = self.license_url.clone();
        info.open_type_head_created = Some(self.created.format("%Y/%m/%d %H:%M:%S").to_string());

        // Set numeric values
        if let Some(units_per_em) =
            norad::fontinfo::NonNegativeIntegerOrFloat::new(metrics.units_per_em)
        {
            info.units_per_em = Some(units_per_em);
        }
        info.ascender = Some(metrics.ascender);
        info.descender = Some(metrics.descender);
        info
    }
}
