//! UFO file I/O operations

use crate::core::errors::{Result, TofuError};
use norad::Font;
use std::path::Path;
use tracing::debug;

/// Write a UFO source to disk, replacing anything already at `path`
pub fn save_ufo(font: &Font, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    font.save(path).map_err(|e| TofuError::Ufo {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    debug!("Saved UFO source to {}", path.display());
    Ok(())
}

/// Load a UFO font file from disk
pub fn load_ufo_from_path(path: impl AsRef<Path>) -> Result<Font> {
    let path = path.as_ref();
    Font::load(path).map_err(|e| TofuError::Ufo {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font_source::{DocumentInfo, FontDocument, GlyphComposer, TofuMetrics};

    #[test]
    fn test_save_and_reload() {
        let mut document = FontDocument::new(0, DocumentInfo::default());
        let composer = GlyphComposer::default();
        for codepoint in [0x41, 0x1F600] {
            let id = document.next_glyph_id();
            document.push(composer.compose(id, codepoint));
        }
        let font = document.to_norad_font(&TofuMetrics::default()).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tofu.ufo");
        save_ufo(&font, &path).unwrap();

        let reloaded = load_ufo_from_path(&path).unwrap();
        let layer = reloaded.default_layer();
        assert_eq!(layer.len(), 19);

        let order = reloaded
            .lib
            .get("public.glyphOrder")
            .and_then(plist::Value::as_array)
            .unwrap();
        assert_eq!(order.len(), 19);
        assert_eq!(order[18].as_string(), Some("u1F600"));

        let glyph = layer.get_glyph("u1F600").unwrap();
        assert_eq!(glyph.components.len(), 7);
        let units_per_em = reloaded
            .font_info
            .units_per_em
            .map(|v| v.to_string().parse::<f64>().unwrap_or_default());
        assert_eq!(units_per_em, Some(1000.0));
    }
}
