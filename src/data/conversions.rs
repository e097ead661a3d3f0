//! UFO format conversion utilities
//!
//! This module contains conversion logic from our document model into the
//! norad UFO format. Shape primitives become outline glyphs; tofu glyphs
//! become component-only glyphs referencing them.

use crate::core::errors::{Result, TofuError};
use crate::font_source::{FontDocument, GlyphDefinition, ShapeReference, TofuMetrics};
use crate::geometry::ShapePrimitive;
use kurbo::{BezPath, PathEl, Point};
use norad::Font;

/// UFO lib key fixing the glyph id order of compiled fonts
pub const GLYPH_ORDER_KEY: &str = "public.glyphOrder";

fn glyph_name(name: &str) -> Result<norad::Name> {
    name.parse().map_err(|_| TofuError::InvalidGlyphName {
        name: name.to_string(),
    })
}

/// Convert a kurbo path into UFO contours
///
/// Closed contours start on their first on-curve point; open ones keep a
/// leading `Move`.
pub fn bezpath_to_contours(path: &BezPath) -> Vec<norad::Contour> {
    let mut contours = Vec::new();
    let mut points: Vec<norad::ContourPoint> = Vec::new();
    let mut start: Option<Point> = None;

    let point = |pt: Point, typ: norad::PointType| {
        norad::ContourPoint::new(pt.x, pt.y, typ, false, None, None)
    };

    for element in path.elements() {
        match *element {
            PathEl::MoveTo(pt) => {
                if !points.is_empty() {
                    contours.push(norad::Contour::new(std::mem::take(&mut points), None));
                }
                start = Some(pt);
                points.push(point(pt, norad::PointType::Move));
            }
            PathEl::LineTo(pt) => {
                points.push(point(pt, norad::PointType::Line));
            }
            PathEl::QuadTo(cp, pt) => {
                points.push(point(cp, norad::PointType::OffCurve));
                points.push(point(pt, norad::PointType::QCurve));
            }
            PathEl::CurveTo(cp1, cp2, pt) => {
                points.push(point(cp1, norad::PointType::OffCurve));
                points.push(point(cp2, norad::PointType::OffCurve));
                points.push(point(pt, norad::PointType::Curve));
            }
            PathEl::ClosePath => {
                // A closing segment drawn back onto the start is implied
                let closes_on_start = points.len() > 1
                    && points.last().is_some_and(|last| {
                        last.typ == norad::PointType::Line
                            && start == Some(Point::new(last.x, last.y))
                    });
                if closes_on_start {
                    points.pop();
                }
                if let Some(first) = points.first_mut() {
                    if first.typ == norad::PointType::Move {
                        first.typ = norad::PointType::Line;
                    }
                }
                contours.push(norad::Contour::new(std::mem::take(&mut points), None));
                start = None;
            }
        }
    }

    if !points.is_empty() {
        contours.push(norad::Contour::new(points, None));
    }
    contours
}

impl ShapePrimitive {
    /// Build the outline glyph for this primitive
    ///
    /// Digits are drawn at their cell origin and placed by component
    /// offsets; the frame is drawn in its final position.
    pub fn to_norad_glyph(self, metrics: &TofuMetrics) -> Result<norad::Glyph> {
        let transform = match self {
            ShapePrimitive::Frame => metrics.canvas_transform(),
            ShapePrimitive::Digit(_) => metrics.cell_transform(),
        };

        let name = glyph_name(&self.glyph_name())?;
        let mut glyph = norad::Glyph::new(name.as_str());
        glyph.width = metrics.advance_width();
        glyph.contours = bezpath_to_contours(&self.outline(transform));
        Ok(glyph)
    }
}

impl ShapeReference {
    pub fn to_norad_component(&self) -> Result<norad::Component> {
        let base = glyph_name(&self.shape.glyph_name())?;
        let transform = norad::AffineTransform {
            x_scale: 1.0,
            xy_scale: 0.0,
            yx_scale: 0.0,
            y_scale: 1.0,
            x_offset: self.offset.x,
            y_offset: self.offset.y,
        };
        Ok(norad::Component::new(base, transform, None))
    }
}

impl GlyphDefinition {
    /// Convert to a component-only norad glyph
    ///
    /// Code points outside the Unicode scalar range get no mapping.
    pub fn to_norad_glyph(&self) -> Result<norad::Glyph> {
        let name = glyph_name(&self.glyph_name())?;
        let mut glyph = norad::Glyph::new(name.as_str());
        glyph.width = self.advance_width;

        if let Some(character) = self.character() {
            glyph.codepoints.insert(character);
        }

        glyph.components = self
            .references
            .iter()
            .map(ShapeReference::to_norad_component)
            .collect::<Result<Vec<_>>>()?;

        Ok(glyph)
    }
}

impl FontDocument {
    /// Convert to a complete norad Font
    pub fn to_norad_font(&self, metrics: &TofuMetrics) -> Result<Font> {
        let mut font = Font::new();

        font.font_info = self
            .info()
            .to_norad_font_info(metrics, self.first_codepoint());

        let layer = font.default_layer_mut();
        for primitive in self.primitives() {
            layer.insert_glyph(primitive.to_norad_glyph(metrics)?);
        }
        for definition in self.glyphs() {
            layer.insert_glyph(definition.to_norad_glyph()?);
        }

        font.lib.insert(
            GLYPH_ORDER_KEY.to_string(),
            plist::Value::Array(
                self.glyph_order()
                    .into_iter()
                    .map(plist::Value::String)
                    .collect(),
            ),
        );

        Ok(font)
    }

    /// Glyph names indexed by glyph id
    pub fn glyph_order(&self) -> Vec<String> {
        self.primitives()
            .map(ShapePrimitive::glyph_name)
            .chain(self.glyphs().iter().map(GlyphDefinition::glyph_name))
            .collect()
    }

    /// Glyphs whose code point cannot be mapped to a character
    pub fn unmapped_count(&self) -> usize {
        self.glyphs()
            .iter()
            .filter(|glyph| glyph.character().is_none())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font_source::{DocumentInfo, GlyphComposer};
    use crate::geometry::HexDigit;

    #[test]
    fn test_closed_polygon_contour() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((0.0, 10.0));
        path.line_to((10.0, 10.0));
        path.close_path();

        let contours = bezpath_to_contours(&path);
        assert_eq!(contours.len(), 1);
        assert_eq!(contours[0].points.len(), 3);
        assert!(contours[0]
            .points
            .iter()
            .all(|p| p.typ == norad::PointType::Line));
    }

    #[test]
    fn test_explicit_closing_point_is_dropped() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((5.0, 0.0));
        path.line_to((5.0, 5.0));
        path.line_to((0.0, 0.0));
        path.close_path();

        let contours = bezpath_to_contours(&path);
        assert_eq!(contours[0].points.len(), 3);
    }

    #[test]
    fn test_curves_keep_off_curve_points() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.curve_to((0.0, 5.0), (5.0, 10.0), (10.0, 10.0));
        path.close_path();

        let contours = bezpath_to_contours(&path);
        let types: Vec<norad::PointType> =
            contours[0].points.iter().map(|p| p.typ.clone()).collect();
        assert_eq!(
            types,
            vec![
                norad::PointType::Line,
                norad::PointType::OffCurve,
                norad::PointType::OffCurve,
                norad::PointType::Curve,
            ]
        );
    }

    #[test]
    fn test_frame_glyph_has_two_contours() {
        let metrics = TofuMetrics::default();
        let glyph = ShapePrimitive::Frame.to_norad_glyph(&metrics).unwrap();
        assert_eq!(glyph.contours.len(), 2);
        assert_eq!(glyph.width, 1000.0);

        let min_x = glyph.contours[0]
            .points
            .iter()
            .map(|p| p.x)
            .fold(f64::INFINITY, f64::min);
        assert!((min_x - metrics.side_bearing()).abs() < 1e-9);
    }

    #[test]
    fn test_digit_glyph_contours() {
        let metrics = TofuMetrics::default();
        let glyph = ShapePrimitive::Digit(HexDigit::Eight)
            .to_norad_glyph(&metrics)
            .unwrap();
        assert_eq!(glyph.contours.len(), 3);
        assert_eq!(glyph.name().as_str(), "tofu.digit8");
    }

    #[test]
    fn test_component_translation() {
        let composer = GlyphComposer::default();
        let definition = composer.compose(17, 0x41);
        let glyph = definition.to_norad_glyph().unwrap();

        assert_eq!(glyph.name().as_str(), "uni0041");
        assert_eq!(glyph.components.len(), 5);
        assert_eq!(glyph.components[0].base.as_str(), "tofu.frame");
        assert_eq!(glyph.components[0].transform.x_offset, 0.0);

        let digit = &glyph.components[4];
        assert_eq!(digit.base.as_str(), "tofu.digit1");
        assert_eq!(digit.transform.x_offset, definition.references[4].offset.x);
        assert_eq!(digit.transform.y_offset, definition.references[4].offset.y);
        assert!(glyph.codepoints.iter().any(|c| c == 'A'));
    }

    #[test]
    fn test_surrogates_are_unmapped() {
        let definition = GlyphComposer::default().compose(17, 0xD800);
        let glyph = definition.to_norad_glyph().unwrap();
        assert_eq!(glyph.codepoints.iter().count(), 0);
        assert_eq!(glyph.components.len(), 5);
    }

    #[test]
    fn test_glyph_order_follows_ids() {
        let mut document = FontDocument::new(0, DocumentInfo::default());
        let composer = GlyphComposer::default();
        for codepoint in [0x42, 0x41, 0x1F600] {
            let id = document.next_glyph_id();
            document.push(composer.compose(id, codepoint));
        }

        let font = document.to_norad_font(&TofuMetrics::default()).unwrap();
        let order: Vec<&str> = font
            .lib
            .get(GLYPH_ORDER_KEY)
            .and_then(plist::Value::as_array)
            .unwrap()
            .iter()
            .filter_map(plist::Value::as_string)
            .collect();

        assert_eq!(order.len(), ShapePrimitive::COUNT + 3);
        for primitive in ShapePrimitive::all() {
            assert_eq!(order[primitive.id() as usize], primitive.glyph_name());
        }
        for glyph in document.glyphs() {
            assert_eq!(order[glyph.id as usize], glyph.glyph_name());
        }
        assert_eq!(&order[17..], ["uni0042", "uni0041", "u1F600"]);
    }

    #[test]
    fn test_document_to_font() {
        let mut document = FontDocument::new(0, DocumentInfo::default());
        let composer = GlyphComposer::default();
        for codepoint in 0x41..=0x44 {
            let id = document.next_glyph_id();
            document.push(composer.compose(id, codepoint));
        }

        let font = document.to_norad_font(&TofuMetrics::default()).unwrap();
        let layer = font.default_layer();
        assert_eq!(layer.len(), ShapePrimitive::COUNT + 4);
        assert!(layer.get_glyph("tofu.frame").is_some());
        assert!(layer.get_glyph("uni0044").is_some());
        assert_eq!(font.font_info.family_name.as_deref(), Some("Tofu"));
        assert_eq!(document.unmapped_count(), 0);
    }
}
